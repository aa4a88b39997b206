// Players take part in leagues. A player is immutable once registered.
use serde_json::json;
use sqlx::FromRow;

use crate::types::{Db, PlayerId};

#[derive(Debug, Default, Clone)]
#[derive(PartialEq)]
#[derive(FromRow)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub last_name: String,
}

// Basics.
impl Player {
    // Get the next ID to use.
    async fn next_id(db: &Db) -> PlayerId {
        let max: Option<PlayerId> = sqlx::query_scalar("SELECT max(id) FROM Player").fetch_one(db).await.unwrap();
        match max {
            Some(n) => n + 1,
            _ => 1,
        }
    }

    // Build a player and save it to the database.
    pub async fn build_and_save(db: &Db, name: &str, last_name: &str) -> Self {
        let player = Self {
            id: Self::next_id(db).await,
            name: name.to_string(),
            last_name: last_name.to_string(),
        };

        player.save(db).await;
        return player;
    }

    // Save the Player to database.
    pub async fn save(&self, db: &Db) {
        sqlx::query(
            "INSERT INTO Player (id, name, last_name)
            VALUES ($1, $2, $3)"
        ).bind(self.id)
        .bind(self.name.as_str())
        .bind(self.last_name.as_str())
        .execute(db).await.unwrap();
    }

    pub async fn fetch_from_db(db: &Db, id: PlayerId) -> Option<Self> {
        sqlx::query_as(
            "SELECT * FROM Player WHERE id = $1"
        ).bind(id)
        .fetch_optional(db).await.unwrap()
    }

    // Get every registered player.
    pub async fn fetch_all(db: &Db) -> Vec<Self> {
        sqlx::query_as(
            "SELECT * FROM Player ORDER BY id ASC"
        ).fetch_all(db).await.unwrap()
    }
}

// Functional.
impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }

    // Get relevant information for a player listing.
    pub fn screen_package(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "name": self.full_name(),
        })
    }
}
