//! Engine error codes

use thiserror::Error;

/// Errors surfaced by the rule table, match engine and session gate.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Move name outside the catalog, or a move the rule table has no entry for.
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("Match is already over; reset before playing again")]
    MatchAlreadyOver,

    #[error("A round is already awaiting reveal")]
    RoundInFlight,

    #[error("Invalid match config: {0}")]
    InvalidConfig(String),

    #[error("Scripted opponent needs at least one move")]
    EmptyScript,
}

pub type Result<T> = std::result::Result<T, EngineError>;
