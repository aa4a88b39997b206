// Custom types that are widely used are defined here.
use sqlx::SqlitePool;

pub type Db = SqlitePool;

// Database ID types.
pub type UserId = u8;
pub type LeagueId = u8;
pub type PlayerId = u16;
pub type GroupId = u16;
pub type MatchId = u16;

// A scheduling round within a league. The first phase is 0.
pub type Phase = u8;

// Type conversions.
pub mod convert {
    use std::fmt::Display;

    // Convert between integers.
    pub fn int<N1: Display + Copy, N2: TryFrom<N1>>(num: N1) -> N2 {
        match num.try_into() {
            Ok(n) => n,
            Err(_) => panic!("num: {num}")
        }
    }
}
