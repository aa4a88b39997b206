// The league database.
use sqlx::{Sqlite, migrate::MigrateDatabase, sqlite::SqlitePoolOptions};

use crate::{commands, league::League, types::Db, user::User};

pub async fn setup() -> Db {
    Sqlite::create_database("sqlite::memory:").await.unwrap();

    // One connection only: every pool connection would get its own empty in-memory database.
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:").await.unwrap();

    sqlx::migrate!("./sql/migrations").run(&db).await.unwrap();
    return db;
}

// Initialise the database with demonstration data.
pub async fn initialise() -> Db {
    let db = setup().await;
    add_league_data(&db).await;
    return db;
}

// Add a league owner, a player pool and one league with a full roster.
async fn add_league_data(db: &Db) {
    let owner = User::build_and_save(db, "admin", "admin@example.com").await;

    let names = [
        ("Ada", "Archer"),
        ("Ben", "Brook"),
        ("Cleo", "Cox"),
        ("Dana", "Dale"),
        ("Eino", "Eskola"),
        ("Fia", "Falk"),
        ("Gus", "Grant"),
        ("Hilla", "Honka"),
        ("Ivo", "Ilves"),
    ];

    let mut player_ids = Vec::new();
    for (name, last_name) in names {
        player_ids.push(commands::register_player(db, name, last_name).await.id);
    }

    let league = League::build_and_save(db, owner.id, "Garage Champions League").await;
    commands::add_players(db, league.id, &player_ids).await.unwrap();
}
