// Generates the double round-robin fixtures of one group.
use crate::{league::group::Group, match_event::Match, types::{Db, PlayerId}};

// Generate matchups where every player faces every other twice, once per slot order.
// Pairs are enumerated in the order of the player list, so the output is
// deterministic for a fixed input. One or zero players yield no matchups.
pub fn double_round_robin(players: &[PlayerId]) -> Vec<(PlayerId, PlayerId)> {
    let mut matchups: Vec<(PlayerId, PlayerId)> = Vec::new();

    for (i, one) in players.iter().enumerate() {
        for two in players.iter().skip(i + 1) {
            matchups.push((*one, *two));
            matchups.push((*two, *one));
        }
    }

    return matchups;
}

// Convert the simple representations of the matchups into Match elements, and save them to the database.
pub async fn generate_fixtures(db: &Db, group: &Group) -> Vec<Match> {
    let members = group.member_ids(db).await;

    let mut matches = Vec::new();
    for (player_one, player_two) in double_round_robin(&members) {
        let mut game = Match::build(group.league_id, group.id, player_one, player_two);
        game.save_new(db).await;
        matches.push(game);
    }

    return matches;
}
