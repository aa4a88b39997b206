pub mod commands;
pub mod database;
pub mod error;
pub mod league;
pub mod match_event;
pub mod player;
pub mod time;
pub mod types;
pub mod user;

use rand::{Rng, rngs::ThreadRng};
use ::time::{Date, Duration, macros::date};

use crate::{commands::ResultEntry, league::{League, group::Group, ranking}, types::Db};

const START_DATE: Date = date!(2025-06-01);

// Seed a demonstration league, play it through with random results,
// and print the standings along the way.
pub async fn run() {
    let db = database::initialise().await;

    let league = League::fetch_from_db(&db, 1).await.unwrap();
    println!("=== {} ===", league.name);

    commands::start_league(&db, league.id, 3, 3, START_DATE).await.unwrap();

    let mut rng = rand::rng();
    for phase in league.phases(&db).await {
        play_phase(&db, &league, phase, &mut rng).await;
    }

    commands::end_league(&db, league.id, START_DATE + Duration::weeks(4)).await.unwrap();

    println!("\n=== Final standings ===");
    println!("{}", ranking::display_standings(&db, &league.matches(&db).await).await);
}

// Record random results for every match of the phase and print the group tables.
async fn play_phase(db: &Db, league: &League, phase: u8, rng: &mut ThreadRng) {
    let played_on = START_DATE + Duration::weeks(phase as i64);

    let mut entries = Vec::new();
    for group in Group::fetch_phase_groups(db, league.id, phase).await {
        for game in group.matches(db).await {
            entries.push(ResultEntry {
                match_id: game.id,
                player_one_score: rng.random_range(0..=4),
                player_two_score: rng.random_range(0..=4),
            });
        }
    }

    // Draws can't be recorded, so reroll them.
    for entry in entries.iter_mut() {
        while entry.player_one_score == entry.player_two_score {
            entry.player_two_score = rng.random_range(0..=4);
        }
    }

    commands::submit_results(db, league.id, &entries, played_on).await.unwrap();

    println!("\n--- Phase {phase} ---");
    for group in Group::fetch_phase_groups(db, league.id, phase).await {
        println!("{}", ranking::display_standings(db, &group.matches(db).await).await);
        println!();
    }
}
