// Groups are the subsets of a league's roster that play each other during one phase.
// Membership is fixed at creation. The next phase gets entirely new groups.
use serde_json::json;
use sqlx::FromRow;

use crate::{
    league::ranking,
    match_event::Match,
    player::Player,
    types::{convert, Db, GroupId, LeagueId, Phase, PlayerId}
};

#[derive(Debug, Default, Clone)]
#[derive(FromRow)]
pub struct Group {
    pub id: GroupId,
    pub league_id: LeagueId,
    pub phase: Phase,

    // Historical naming: this is the league's group count, not the member count.
    pub size: u8,
}

// Basics.
impl Group {
    // Get the next ID to use.
    async fn next_id(db: &Db) -> GroupId {
        let max: Option<GroupId> = sqlx::query_scalar("SELECT max(id) FROM LeagueGroup").fetch_one(db).await.unwrap();
        match max {
            Some(n) => n + 1,
            _ => 1,
        }
    }

    // Build a group and save it to the database, members included.
    pub async fn build_and_save(db: &Db, league_id: LeagueId, phase: Phase, size: u8, members: &[PlayerId]) -> Self {
        let group = Self {
            id: Self::next_id(db).await,
            league_id: league_id,
            phase: phase,
            size: size,
        };

        group.save(db).await;
        for player_id in members {
            group.add_member(db, *player_id).await;
        }

        return group;
    }

    // Save the Group to database.
    async fn save(&self, db: &Db) {
        sqlx::query(
            "INSERT INTO LeagueGroup (id, league_id, phase, size)
            VALUES ($1, $2, $3, $4)"
        ).bind(self.id)
        .bind(self.league_id)
        .bind(self.phase)
        .bind(self.size)
        .execute(db).await.unwrap();
    }

    // Add one player to the group.
    async fn add_member(&self, db: &Db, player_id: PlayerId) {
        sqlx::query(
            "INSERT INTO GroupPlayer (group_id, player_id)
            VALUES ($1, $2)"
        ).bind(self.id)
        .bind(player_id)
        .execute(db).await.unwrap();
    }

    // Get all groups of one phase of a league.
    pub async fn fetch_phase_groups(db: &Db, league_id: LeagueId, phase: Phase) -> Vec<Self> {
        sqlx::query_as(
            "SELECT * FROM LeagueGroup
            WHERE league_id = $1 AND phase = $2
            ORDER BY id ASC"
        ).bind(league_id)
        .bind(phase)
        .fetch_all(db).await.unwrap()
    }

    // Get the member IDs in the order they were assigned.
    pub async fn member_ids(&self, db: &Db) -> Vec<PlayerId> {
        sqlx::query_scalar(
            "SELECT player_id FROM GroupPlayer
            WHERE group_id = $1
            ORDER BY rowid ASC"
        ).bind(self.id)
        .fetch_all(db).await.unwrap()
    }

    // Get the matches generated for this group.
    pub async fn matches(&self, db: &Db) -> Vec<Match> {
        Match::fetch_group_matches(db, self.id).await
    }
}

// Functional.
impl Group {
    // Get relevant information for a group screen: members, standings and matches.
    pub async fn screen_package(&self, db: &Db) -> serde_json::Value {
        let matches = self.matches(db).await;

        let mut members = Vec::new();
        for id in self.member_ids(db).await {
            members.push(Player::fetch_from_db(db, id).await.unwrap().screen_package());
        }

        let mut standings = Vec::new();
        for (i, standing) in ranking::standings(&matches).iter().enumerate() {
            standings.push(standing.screen_package(db, convert::int(i + 1)).await);
        }

        let mut played_matches = Vec::new();
        let mut upcoming_matches = Vec::new();
        for game in matches.iter() {
            let package = game.screen_package(db).await;
            match game.is_played() {
                true => played_matches.push(package),
                false => upcoming_matches.push(package),
            }
        }

        json!({
            "id": self.id,
            "phase": self.phase,
            "players": members,
            "standings": standings,
            "played_matches": played_matches,
            "upcoming_matches": upcoming_matches,
        })
    }
}
