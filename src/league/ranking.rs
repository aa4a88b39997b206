// Functions for ranking players within a group or a whole league.
use std::collections::HashMap;

use ordinal::ToOrdinal as _;
use serde::Serialize;
use serde_json::json;

use crate::{
    league::encounter::{self, Encounter, PairKey},
    match_event::Match,
    player::Player,
    types::{Db, PlayerId}
};

// Accumulated results of one player within a scope. Derived, never stored.
#[derive(Debug, Default, Clone)]
#[derive(PartialEq)]
#[derive(Serialize)]
pub struct Standing {
    pub player_id: PlayerId,
    pub points: u16,
    pub goal_difference: i16,

    // Finished encounters. For display only, ranking ignores it.
    pub matches_played: u8,
}

impl Standing {
    // Get relevant information for a standings table row.
    pub async fn screen_package(&self, db: &Db, rank: u8) -> serde_json::Value {
        let player = Player::fetch_from_db(db, self.player_id).await.unwrap();

        json!({
            "rank": rank.to_ordinal_string(),
            "player_id": self.player_id,
            "name": player.full_name(),
            "points": self.points,
            "goal_difference": self.goal_difference,
            "matches_played": self.matches_played,
        })
    }
}

// Rank the players appearing in the given matches.
// Points come from finished encounters only. Goal difference counts every
// match, pending ones included, since unplayed matches default to 0-0.
// Players tied on both points and goal difference stay in roster ID order;
// no further tie-break exists.
pub fn standings(matches: &[Match]) -> Vec<Standing> {
    let encounters = encounter::encounters(matches);

    // Sorting the keys keeps the accumulation order deterministic.
    let mut keys: Vec<&PairKey> = encounters.keys().collect();
    keys.sort();

    let mut table: HashMap<PlayerId, Standing> = HashMap::new();
    for key in keys {
        accumulate(&mut table, key, &encounters[key]);
    }

    let mut standings: Vec<Standing> = table.into_values().collect();
    standings.sort_by(|a, b| a.player_id.cmp(&b.player_id));
    standings.sort_by(|a, b| {
        b.points.cmp(&a.points)
        .then(b.goal_difference.cmp(&a.goal_difference))
    });

    return standings;
}

// Add one encounter to the standings of both of its players.
fn accumulate(table: &mut HashMap<PlayerId, Standing>, key: &PairKey, encounter: &Encounter) {
    let (one_points, two_points) = encounter.points();

    {
        let one = entry(table, key.one);
        one.points += one_points as u16;
        if encounter.done { one.matches_played += 1; }
    }
    {
        let two = entry(table, key.two);
        two.points += two_points as u16;
        if encounter.done { two.matches_played += 1; }
    }

    // Goal difference follows the actual fixture slots, not the pair-key order.
    for game in encounter.matches.iter() {
        let difference = (game.player_one_score as i16) - (game.player_two_score as i16);
        entry(table, game.player_one_id).goal_difference += difference;
        entry(table, game.player_two_id).goal_difference -= difference;
    }
}

fn entry(table: &mut HashMap<PlayerId, Standing>, player_id: PlayerId) -> &mut Standing {
    table.entry(player_id).or_insert_with(|| Standing {
        player_id: player_id,
        ..Default::default()
    })
}

// Get the standings of the given matches as a terminal table.
pub async fn display_standings(db: &Db, matches: &[Match]) -> String {
    let mut s: String = "Rank\tName\tMP\tDiff\tPts".to_string();
    for (i, standing) in standings(matches).iter().enumerate() {
        let player = Player::fetch_from_db(db, standing.player_id).await.unwrap();
        s += &format!("\n{}.\t{}\t{}\t{}\t{}",
            i + 1,
            player.full_name(),
            standing.matches_played,
            standing.goal_difference,
            standing.points
        );
    }

    return s;
}

// Get how many finished encounters the player has in the given matches.
pub fn matches_played(matches: &[Match], player_id: PlayerId) -> u8 {
    encounter::encounters(matches)
        .iter()
        .filter(|(key, encounter)| encounter.done && (key.one == player_id || key.two == player_id))
        .count() as u8
}
