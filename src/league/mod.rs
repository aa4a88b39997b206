// Leagues run a roster of players through phases of round-robin groups.
pub mod group;
pub mod group_generator;
pub mod schedule_generator;
pub mod encounter;
pub mod ranking;

use serde_json::json;
use sqlx::FromRow;
use time::Date;

use crate::{
    error::Error,
    league::group::Group,
    match_event::Match,
    player::Player,
    time::optional_date_to_iso_string,
    types::{convert, Db, LeagueId, Phase, PlayerId, UserId},
    user::User
};

#[derive(Debug, Default, Clone)]
#[derive(FromRow)]
pub struct League {
    pub id: LeagueId,
    pub owner_id: UserId,
    #[sqlx(rename = "league_name")]
    pub name: String,

    // Set once the league starts. Groups and matches exist from then on.
    pub date_started: Option<Date>,

    // Set once the league ends. The league is read-only from then on.
    pub date_ended: Option<Date>,
}

// Basics.
impl League {
    // Get the next ID to use.
    async fn next_id(db: &Db) -> LeagueId {
        let max: Option<LeagueId> = sqlx::query_scalar("SELECT max(id) FROM League").fetch_one(db).await.unwrap();
        match max {
            Some(n) => n + 1,
            _ => 1,
        }
    }

    // Build a league and save it to the database.
    pub async fn build_and_save(db: &Db, owner_id: UserId, name: &str) -> Self {
        let league = Self {
            id: Self::next_id(db).await,
            owner_id: owner_id,
            name: name.to_string(),

            ..Default::default()
        };

        league.save_new(db).await;
        return league;
    }

    // Save a league to the database for the first time.
    async fn save_new(&self, db: &Db) {
        sqlx::query(
            "INSERT INTO League (id, owner_id, league_name, date_started, date_ended)
            VALUES ($1, $2, $3, $4, $5)"
        ).bind(self.id)
        .bind(self.owner_id)
        .bind(self.name.as_str())
        .bind(self.date_started)
        .bind(self.date_ended)
        .execute(db).await.unwrap();
    }

    // Update the league's lifecycle dates to the database.
    async fn save_dates(&self, db: &Db) {
        sqlx::query(
            "UPDATE League SET date_started = $1, date_ended = $2
            WHERE id = $3"
        ).bind(self.date_started)
        .bind(self.date_ended)
        .bind(self.id)
        .execute(db).await.unwrap();
    }

    pub async fn fetch_from_db(db: &Db, id: LeagueId) -> Option<Self> {
        sqlx::query_as(
            "SELECT * FROM League WHERE id = $1"
        ).bind(id)
        .fetch_optional(db).await.unwrap()
    }

    // Get all leagues that have been started.
    pub async fn fetch_started(db: &Db) -> Vec<Self> {
        sqlx::query_as(
            "SELECT * FROM League
            WHERE date_started IS NOT NULL
            ORDER BY id ASC"
        ).fetch_all(db).await.unwrap()
    }

    // Get the roster in a fixed order. Partitioning indexes into this.
    pub async fn player_ids(&self, db: &Db) -> Vec<PlayerId> {
        sqlx::query_scalar(
            "SELECT player_id FROM LeaguePlayer
            WHERE league_id = $1
            ORDER BY player_id ASC"
        ).bind(self.id)
        .fetch_all(db).await.unwrap()
    }

    pub async fn players(&self, db: &Db) -> Vec<Player> {
        let mut players = Vec::new();
        for id in self.player_ids(db).await {
            players.push(Player::fetch_from_db(db, id).await.unwrap());
        }
        return players;
    }

    // Get the phase indices the league has groups for, in ascending order.
    pub async fn phases(&self, db: &Db) -> Vec<Phase> {
        sqlx::query_scalar(
            "SELECT DISTINCT phase FROM LeagueGroup
            WHERE league_id = $1
            ORDER BY phase ASC"
        ).bind(self.id)
        .fetch_all(db).await.unwrap()
    }

    pub async fn matches(&self, db: &Db) -> Vec<Match> {
        Match::fetch_league_matches(db, self.id).await
    }
}

// Lifecycle.
impl League {
    pub fn has_started(&self) -> bool {
        self.date_started.is_some()
    }

    pub fn has_ended(&self) -> bool {
        self.date_ended.is_some()
    }

    // Add a player to the roster. Only possible before the start.
    pub async fn add_player(&self, db: &Db, player_id: PlayerId) -> Result<(), Error> {
        self.check_roster_open()?;

        sqlx::query(
            "INSERT INTO LeaguePlayer (league_id, player_id)
            VALUES ($1, $2)"
        ).bind(self.id)
        .bind(player_id)
        .execute(db).await.unwrap();

        return Ok(());
    }

    // Remove a player from the roster. Only possible before the start.
    pub async fn remove_player(&self, db: &Db, player_id: PlayerId) -> Result<(), Error> {
        self.check_roster_open()?;

        sqlx::query(
            "DELETE FROM LeaguePlayer
            WHERE league_id = $1 AND player_id = $2"
        ).bind(self.id)
        .bind(player_id)
        .execute(db).await.unwrap();

        return Ok(());
    }

    // Check that the roster can still be changed.
    fn check_roster_open(&self) -> Result<(), Error> {
        if self.has_ended() { return Err(Error::AlreadyEnded); }
        if self.has_started() { return Err(Error::AlreadyStarted); }
        return Ok(());
    }

    // Start the league: fix the groups and matches of every phase, stamp the date.
    // NOTE: group_count is the number of groups per phase, not the size of one.
    pub async fn start(&mut self, db: &Db, group_count: u8, phases: Phase, today: Date) -> Result<(), Error> {
        if self.has_ended() { return Err(Error::AlreadyEnded); }
        if self.has_started() { return Err(Error::AlreadyStarted); }
        if group_count == 0 || phases == 0 { return Err(Error::InvalidConfiguration); }
        if self.player_ids(db).await.is_empty() { return Err(Error::EmptyRoster); }

        group_generator::create_all_phases(db, self, group_count, phases).await?;

        self.date_started = Some(today);
        self.save_dates(db).await;

        return Ok(());
    }

    // End the league. Terminal: nothing can be recorded afterwards.
    pub async fn end(&mut self, db: &Db, today: Date) -> Result<(), Error> {
        if self.has_ended() { return Err(Error::AlreadyEnded); }
        if !self.has_started() { return Err(Error::NotStarted); }

        self.date_ended = Some(today);
        self.save_dates(db).await;

        return Ok(());
    }
}

// Queries.
impl League {
    // Get the phase currently being played: the first phase with an unfinished
    // encounter. A league with every encounter done has no current phase.
    pub async fn current_phase(&self, db: &Db) -> Option<Phase> {
        for phase in self.phases(db).await {
            let mut matches = Vec::new();
            for group in Group::fetch_phase_groups(db, self.id, phase).await {
                matches.append(&mut group.matches(db).await);
            }

            if !encounter::all_done(&matches) {
                return Some(phase);
            }
        }

        return None;
    }

    // Get a one-line listing entry: name, owner and lifecycle dates.
    pub async fn summary_package(&self, db: &Db) -> serde_json::Value {
        let owner = User::fetch_from_db(db, self.owner_id).await.unwrap();

        json!({
            "id": self.id,
            "name": self.name,
            "owner": owner.username,
            "date_started": optional_date_to_iso_string(&self.date_started),
            "date_ended": optional_date_to_iso_string(&self.date_ended),
        })
    }

    // Get relevant information for a league screen.
    pub async fn screen_package(&self, db: &Db) -> serde_json::Value {
        let mut players = Vec::new();
        for player in self.players(db).await {
            players.push(player.screen_package());
        }

        let mut phases = Vec::new();
        for phase in self.phases(db).await {
            let mut groups = Vec::new();
            for group in Group::fetch_phase_groups(db, self.id, phase).await {
                groups.push(group.screen_package(db).await);
            }

            phases.push(json!({
                "phase": phase,
                "groups": groups,
            }));
        }

        // League-wide table over every phase's matches.
        let mut standings = Vec::new();
        let matches = self.matches(db).await;
        for (i, standing) in ranking::standings(&matches).iter().enumerate() {
            standings.push(standing.screen_package(db, convert::int(i + 1)).await);
        }

        json!({
            "id": self.id,
            "name": self.name,
            "date_started": optional_date_to_iso_string(&self.date_started),
            "date_ended": optional_date_to_iso_string(&self.date_ended),
            "players": players,
            "phases": phases,
            "standings": standings,
            "current_phase": self.current_phase(db).await,
        })
    }
}
