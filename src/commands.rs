// Functions that allow a frontend to interact with the backend.
// Every operation validates first and writes after; a failed batch writes nothing.
use serde::Deserialize;
use time::Date;

use crate::{
    error::Error,
    league::League,
    match_event::Match,
    player::Player,
    types::{Db, LeagueId, MatchId, Phase, PlayerId, UserId}
};

// One entry of a result submission form.
#[derive(Debug, Clone, Copy)]
#[derive(Deserialize)]
pub struct ResultEntry {
    pub match_id: MatchId,
    pub player_one_score: u8,
    pub player_two_score: u8,
}

// Register a new player into the global pool.
pub async fn register_player(db: &Db, name: &str, last_name: &str) -> Player {
    Player::build_and_save(db, name, last_name).await
}

// Create a league with an empty roster.
pub async fn create_league(db: &Db, owner_id: UserId, name: &str) -> League {
    League::build_and_save(db, owner_id, name).await
}

// Add players to a league's roster.
pub async fn add_players(db: &Db, league_id: LeagueId, player_ids: &[PlayerId]) -> Result<(), Error> {
    let league = fetch_league(db, league_id).await?;

    for id in player_ids {
        if Player::fetch_from_db(db, *id).await.is_none() {
            return Err(Error::NotFound(format!("player {id}")));
        }
    }

    for id in player_ids {
        league.add_player(db, *id).await?;
    }

    return Ok(());
}

// Remove players from a league's roster.
pub async fn remove_players(db: &Db, league_id: LeagueId, player_ids: &[PlayerId]) -> Result<(), Error> {
    let league = fetch_league(db, league_id).await?;

    for id in player_ids {
        league.remove_player(db, *id).await?;
    }

    return Ok(());
}

// Start a league with the given number of groups and phases.
pub async fn start_league(db: &Db, league_id: LeagueId, group_count: u8, phases: Phase, today: Date) -> Result<(), Error> {
    let mut league = fetch_league(db, league_id).await?;
    league.start(db, group_count, phases, today).await
}

// Record a batch of match results, all stamped with the same date.
// Every entry is validated before the first write.
pub async fn submit_results(db: &Db, league_id: LeagueId, entries: &[ResultEntry], today: Date) -> Result<(), Error> {
    let league = fetch_league(db, league_id).await?;
    if league.has_ended() { return Err(Error::AlreadyEnded); }
    if !league.has_started() { return Err(Error::NotStarted); }

    let mut matches = Vec::new();
    for entry in entries {
        let game = match Match::fetch_from_db(db, entry.match_id).await {
            Some(game) if game.league_id == league.id => game,
            _ => return Err(Error::NotFound(format!("match {}", entry.match_id))),
        };

        game.check_result(entry.player_one_score, entry.player_two_score)?;
        matches.push(game);
    }

    for (game, entry) in matches.iter_mut().zip(entries) {
        game.record_result(db, entry.player_one_score, entry.player_two_score, today).await;
    }

    return Ok(());
}

// End a league for good.
pub async fn end_league(db: &Db, league_id: LeagueId, today: Date) -> Result<(), Error> {
    let mut league = fetch_league(db, league_id).await?;
    league.end(db, today).await
}

// Get the full league screen: players, phases, groups, standings.
pub async fn league_screen_package(db: &Db, league_id: LeagueId) -> Result<serde_json::Value, Error> {
    let league = fetch_league(db, league_id).await?;
    Ok(league.screen_package(db).await)
}

// List every league that has been started.
pub async fn list_leagues(db: &Db) -> Vec<serde_json::Value> {
    let mut packages = Vec::new();
    for league in League::fetch_started(db).await {
        packages.push(league.summary_package(db).await);
    }
    return packages;
}

// List every registered player.
pub async fn list_players(db: &Db) -> Vec<serde_json::Value> {
    Player::fetch_all(db).await.iter().map(|player| player.screen_package()).collect()
}

async fn fetch_league(db: &Db, league_id: LeagueId) -> Result<League, Error> {
    match League::fetch_from_db(db, league_id).await {
        Some(league) => Ok(league),
        None => Err(Error::NotFound(format!("league {league_id}"))),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{database, league::{encounter::PairKey, group::Group, encounter}, user::User};

    use super::*;

    const TODAY: Date = date!(2024-05-01);

    // Set up a database with one owner and a four-player league.
    async fn small_league(db: &Db) -> League {
        let owner = User::build_and_save(db, "admin", "admin@example.com").await;

        // Registration order fixes the roster order: A=1, B=2, C=3, D=4.
        register_player(db, "Ada", "Archer").await;
        register_player(db, "Ben", "Brook").await;
        register_player(db, "Cleo", "Cox").await;
        register_player(db, "Dana", "Dale").await;

        let league = create_league(db, owner.id, "Office Champions").await;
        add_players(db, league.id, &[1, 2, 3, 4]).await.unwrap();
        return league;
    }

    #[tokio::test]
    async fn starting_splits_the_roster_into_groups() {
        let db = database::setup().await;
        let league = small_league(&db).await;

        start_league(&db, league.id, 2, 1, TODAY).await.unwrap();

        // Round-robin by roster index: 1 and 3 together, 2 and 4 together.
        let groups = Group::fetch_phase_groups(&db, league.id, 0).await;
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].member_ids(&db).await, vec![1, 3]);
        assert_eq!(groups[1].member_ids(&db).await, vec![2, 4]);

        // Two matches per pair, one in each direction.
        let matches = groups[0].matches(&db).await;
        assert_eq!(matches.len(), 2);
        assert_eq!((matches[0].player_one_id, matches[0].player_two_id), (1, 3));
        assert_eq!((matches[1].player_one_id, matches[1].player_two_id), (3, 1));
    }

    #[tokio::test]
    async fn roster_is_locked_once_started() {
        let db = database::setup().await;
        let league = small_league(&db).await;
        start_league(&db, league.id, 2, 1, TODAY).await.unwrap();

        let result = add_players(&db, league.id, &[1]).await;
        assert_eq!(result, Err(Error::AlreadyStarted));

        let result = remove_players(&db, league.id, &[1]).await;
        assert_eq!(result, Err(Error::AlreadyStarted));
    }

    #[tokio::test]
    async fn starting_twice_or_with_zero_groups_fails() {
        let db = database::setup().await;
        let league = small_league(&db).await;

        assert_eq!(start_league(&db, league.id, 0, 1, TODAY).await, Err(Error::InvalidConfiguration));

        start_league(&db, league.id, 2, 1, TODAY).await.unwrap();
        assert_eq!(start_league(&db, league.id, 2, 1, TODAY).await, Err(Error::AlreadyStarted));
    }

    #[tokio::test]
    async fn a_swept_encounter_shows_up_in_the_standings() {
        let db = database::setup().await;
        let league = small_league(&db).await;
        start_league(&db, league.id, 2, 1, TODAY).await.unwrap();

        // Player 1 beats player 3 in both of their matches: 3-1 and 2-0.
        let groups = Group::fetch_phase_groups(&db, league.id, 0).await;
        let matches = groups[0].matches(&db).await;
        submit_results(&db, league.id, &[
            ResultEntry { match_id: matches[0].id, player_one_score: 3, player_two_score: 1 },
            ResultEntry { match_id: matches[1].id, player_one_score: 0, player_two_score: 2 },
        ], TODAY).await.unwrap();

        let played = groups[0].matches(&db).await;
        let encounter = &encounter::encounters(&played)[&PairKey::build(1, 3)];
        assert_eq!(encounter.one_wins, 2);
        assert_eq!(encounter.two_wins, 0);
        assert!(encounter.done);

        let standings = crate::league::ranking::standings(&played);
        assert_eq!(standings[0].player_id, 1);
        assert_eq!(standings[0].points, 3);
        assert_eq!(standings[0].goal_difference, 4);
        assert_eq!(standings[1].player_id, 3);
        assert_eq!(standings[1].points, 0);
        assert_eq!(standings[1].goal_difference, -4);
    }

    #[tokio::test]
    async fn one_bad_entry_fails_the_whole_batch() {
        let db = database::setup().await;
        let league = small_league(&db).await;
        start_league(&db, league.id, 2, 1, TODAY).await.unwrap();

        let groups = Group::fetch_phase_groups(&db, league.id, 0).await;
        let matches = groups[0].matches(&db).await;
        let result = submit_results(&db, league.id, &[
            ResultEntry { match_id: matches[0].id, player_one_score: 3, player_two_score: 1 },
            ResultEntry { match_id: matches[1].id, player_one_score: 2, player_two_score: 2 },
        ], TODAY).await;

        assert_eq!(result, Err(Error::EqualScores(matches[1].id)));

        // Nothing was written, the valid entry included.
        for game in groups[0].matches(&db).await {
            assert!(!game.is_played());
        }
    }

    #[tokio::test]
    async fn current_phase_follows_the_first_unfinished_encounter() {
        let db = database::setup().await;
        let league = small_league(&db).await;

        // Two phases of two groups: every group holds one pair.
        start_league(&db, league.id, 2, 2, TODAY).await.unwrap();
        let league = League::fetch_from_db(&db, league.id).await.unwrap();
        assert_eq!(league.phases(&db).await, vec![0, 1]);
        assert_eq!(league.current_phase(&db).await, Some(0));

        // Finish phase 0.
        let mut entries = Vec::new();
        for group in Group::fetch_phase_groups(&db, league.id, 0).await {
            for game in group.matches(&db).await {
                entries.push(ResultEntry { match_id: game.id, player_one_score: 1, player_two_score: 0 });
            }
        }
        submit_results(&db, league.id, &entries, TODAY).await.unwrap();
        assert_eq!(league.current_phase(&db).await, Some(1));

        // Finish phase 1 as well.
        let mut entries = Vec::new();
        for group in Group::fetch_phase_groups(&db, league.id, 1).await {
            for game in group.matches(&db).await {
                entries.push(ResultEntry { match_id: game.id, player_one_score: 0, player_two_score: 2 });
            }
        }
        submit_results(&db, league.id, &entries, TODAY).await.unwrap();
        assert_eq!(league.current_phase(&db).await, None);

        end_league(&db, league.id, TODAY).await.unwrap();
        let league = League::fetch_from_db(&db, league.id).await.unwrap();
        assert!(league.has_ended());
        assert_eq!(submit_results(&db, league.id, &[], TODAY).await, Err(Error::AlreadyEnded));
    }

    #[tokio::test]
    async fn league_screen_package_carries_the_ranked_table() {
        let db = database::setup().await;
        let league = small_league(&db).await;
        start_league(&db, league.id, 2, 1, TODAY).await.unwrap();

        let package = league_screen_package(&db, league.id).await.unwrap();
        assert_eq!(package["name"], "Office Champions");
        assert_eq!(package["players"].as_array().unwrap().len(), 4);
        assert_eq!(package["phases"].as_array().unwrap().len(), 1);
        assert_eq!(package["current_phase"], 0);

        let groups = &package["phases"][0]["groups"];
        assert_eq!(groups.as_array().unwrap().len(), 2);
        assert_eq!(groups[0]["upcoming_matches"].as_array().unwrap().len(), 2);
        assert_eq!(groups[0]["played_matches"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn only_started_leagues_are_listed() {
        let db = database::setup().await;
        let league = small_league(&db).await;
        assert!(list_leagues(&db).await.is_empty());
        assert_eq!(list_players(&db).await.len(), 4);

        start_league(&db, league.id, 2, 1, TODAY).await.unwrap();

        let listed = list_leagues(&db).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["owner"], "admin");
    }

    #[tokio::test]
    async fn unknown_ids_are_rejected() {
        let db = database::setup().await;
        let league = small_league(&db).await;

        assert!(matches!(add_players(&db, league.id, &[99]).await, Err(Error::NotFound(_))));
        assert!(matches!(start_league(&db, 99, 2, 1, TODAY).await, Err(Error::NotFound(_))));

        start_league(&db, league.id, 2, 1, TODAY).await.unwrap();
        let entry = ResultEntry { match_id: 999, player_one_score: 1, player_two_score: 0 };
        assert!(matches!(submit_results(&db, league.id, &[entry], TODAY).await, Err(Error::NotFound(_))));
    }
}
