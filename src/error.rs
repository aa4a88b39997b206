// Errors for the scheduling engine and the command layer.
// Deterministic failures are values; infrastructure failures panic like everywhere else in the app.
use thiserror::Error;

use crate::types::MatchId;

#[derive(Debug)]
#[derive(Error)]
#[derive(PartialEq)]
pub enum Error {
    // Partitioning was asked for zero groups.
    #[error("group count must be at least 1")]
    InvalidConfiguration,

    #[error("{0} not found")]
    NotFound(String),

    // The original rule: a match can't end in a draw.
    #[error("scores of match {0} can't be equal")]
    EqualScores(MatchId),

    #[error("match {0} already has a result")]
    AlreadyPlayed(MatchId),

    #[error("league has already started")]
    AlreadyStarted,

    #[error("league has not been started")]
    NotStarted,

    #[error("league has already ended")]
    AlreadyEnded,

    #[error("league has no players")]
    EmptyRoster,
}
