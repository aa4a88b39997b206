// Users own leagues. Authentication lives in the web layer, not here.
use sqlx::FromRow;

use crate::types::{Db, UserId};

#[derive(Debug, Default, Clone)]
#[derive(FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

impl User {
    // Get the next ID to use.
    async fn next_id(db: &Db) -> UserId {
        let max: Option<UserId> = sqlx::query_scalar("SELECT max(id) FROM User").fetch_one(db).await.unwrap();
        match max {
            Some(n) => n + 1,
            _ => 1,
        }
    }

    // Build a user and save it to the database.
    pub async fn build_and_save(db: &Db, username: &str, email: &str) -> Self {
        let user = Self {
            id: Self::next_id(db).await,
            username: username.to_string(),
            email: email.to_string(),
        };

        user.save(db).await;
        return user;
    }

    // Save the User to database.
    pub async fn save(&self, db: &Db) {
        sqlx::query(
            "INSERT INTO User (id, username, email)
            VALUES ($1, $2, $3)"
        ).bind(self.id)
        .bind(self.username.as_str())
        .bind(self.email.as_str())
        .execute(db).await.unwrap();
    }

    pub async fn fetch_from_db(db: &Db, id: UserId) -> Option<Self> {
        sqlx::query_as(
            "SELECT * FROM User WHERE id = $1"
        ).bind(id)
        .fetch_optional(db).await.unwrap()
    }
}
