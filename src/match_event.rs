// Matches are the scheduled games between two players of one group.
// A match is pending until a result is recorded, and final forever after.
use serde_json::json;
use sqlx::FromRow;
use time::Date;

use crate::{
    error::Error,
    player::Player,
    time::optional_date_to_iso_string,
    types::{Db, GroupId, LeagueId, MatchId, PlayerId}
};

#[derive(Debug, Default, Clone)]
#[derive(PartialEq)]
#[derive(FromRow)]
pub struct Match {
    pub id: MatchId,
    pub league_id: LeagueId,
    pub group_id: GroupId,

    // Fixture slots, not a ranking. Each pair gets one match per slot order.
    pub player_one_id: PlayerId,
    pub player_two_id: PlayerId,
    pub player_one_score: u8,
    pub player_two_score: u8,
    pub played_on: Option<Date>,
}

// Basics.
impl Match {
    // Get the next ID to use.
    async fn next_id(db: &Db) -> MatchId {
        let max: Option<MatchId> = sqlx::query_scalar("SELECT max(id) FROM LeagueMatch").fetch_one(db).await.unwrap();
        match max {
            Some(n) => n + 1,
            _ => 1,
        }
    }

    // Build a pending match with zero scores.
    pub fn build(league_id: LeagueId, group_id: GroupId, player_one_id: PlayerId, player_two_id: PlayerId) -> Self {
        Self {
            league_id: league_id,
            group_id: group_id,
            player_one_id: player_one_id,
            player_two_id: player_two_id,

            ..Default::default()
        }
    }

    // Save a match to the database for the first time.
    pub async fn save_new(&mut self, db: &Db) {
        self.id = Self::next_id(db).await;

        sqlx::query(
            "INSERT INTO LeagueMatch
            (id, league_id, group_id, player_one_id, player_two_id, player_one_score, player_two_score, played_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
        ).bind(self.id)
        .bind(self.league_id)
        .bind(self.group_id)
        .bind(self.player_one_id)
        .bind(self.player_two_id)
        .bind(self.player_one_score)
        .bind(self.player_two_score)
        .bind(self.played_on)
        .execute(db).await.unwrap();
    }

    pub async fn fetch_from_db(db: &Db, id: MatchId) -> Option<Self> {
        sqlx::query_as(
            "SELECT * FROM LeagueMatch WHERE id = $1"
        ).bind(id)
        .fetch_optional(db).await.unwrap()
    }

    // Get all matches of one group.
    pub async fn fetch_group_matches(db: &Db, group_id: GroupId) -> Vec<Self> {
        sqlx::query_as(
            "SELECT * FROM LeagueMatch
            WHERE group_id = $1
            ORDER BY id ASC"
        ).bind(group_id)
        .fetch_all(db).await.unwrap()
    }

    // Get all matches of one league, every phase included.
    pub async fn fetch_league_matches(db: &Db, league_id: LeagueId) -> Vec<Self> {
        sqlx::query_as(
            "SELECT * FROM LeagueMatch
            WHERE league_id = $1
            ORDER BY id ASC"
        ).bind(league_id)
        .fetch_all(db).await.unwrap()
    }
}

// Functional.
impl Match {
    pub fn is_played(&self) -> bool {
        self.played_on.is_some()
    }

    // Get the winner of the match. Pending matches and draws have no winner.
    pub fn winner_id(&self) -> Option<PlayerId> {
        if !self.is_played() { return None; }

        if self.player_one_score > self.player_two_score {
            Some(self.player_one_id)
        }
        else if self.player_two_score > self.player_one_score {
            Some(self.player_two_id)
        }
        else {
            None
        }
    }

    // Check that a result may be recorded on this match.
    pub fn check_result(&self, score_one: u8, score_two: u8) -> Result<(), Error> {
        if self.is_played() {
            return Err(Error::AlreadyPlayed(self.id));
        }

        // The original rule: scores can't be equal.
        if score_one == score_two {
            return Err(Error::EqualScores(self.id));
        }

        return Ok(());
    }

    // Record a result. Scores and the played-on date change together, exactly once.
    pub async fn record_result(&mut self, db: &Db, score_one: u8, score_two: u8, played_on: Date) {
        self.player_one_score = score_one;
        self.player_two_score = score_two;
        self.played_on = Some(played_on);

        sqlx::query(
            "UPDATE LeagueMatch SET
            player_one_score = $1, player_two_score = $2, played_on = $3
            WHERE id = $4"
        ).bind(self.player_one_score)
        .bind(self.player_two_score)
        .bind(self.played_on)
        .bind(self.id)
        .execute(db).await.unwrap();
    }

    // Get relevant information for a match listing.
    pub async fn screen_package(&self, db: &Db) -> serde_json::Value {
        let player_one = Player::fetch_from_db(db, self.player_one_id).await.unwrap();
        let player_two = Player::fetch_from_db(db, self.player_two_id).await.unwrap();

        json!({
            "id": self.id,
            "player_one": player_one.full_name(),
            "player_two": player_two.full_name(),
            "player_one_score": self.player_one_score,
            "player_two_score": self.player_two_score,
            "played_on": optional_date_to_iso_string(&self.played_on),
        })
    }
}
