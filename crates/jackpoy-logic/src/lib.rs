//! Match Logic for Jack n Poy
//!
//! Rock, paper, scissors, nails, hammer, wood, glue: a seven-move
//! rock-paper-scissors played for a fixed number of rounds against a
//! uniformly random computer. This crate is compiled to:
//! - Native (engine and tests)
//! - WASM (browser frontend, `wasm` feature)

mod error;
mod moves;
mod rules;
mod opponent;
mod game;
mod session;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{EngineError, Result};
pub use moves::{moves_list, Move, MoveGuide};
pub use rules::{relation, Disagreement, RoundOutcome, RuleEntry, RuleTable};
pub use opponent::{Opponent, RandomOpponent, ScriptedOpponent};
pub use game::{
    MatchConfig, MatchEngine, MatchPhase, MatchState, MatchStatus, MatchVerdict, RoundResult,
    DEFAULT_MAX_ROUNDS,
};
pub use session::Session;

/// Standard ten-round match against a random opponent seeded from OS entropy
pub fn new_match() -> MatchEngine<RandomOpponent> {
    MatchEngine::standard(RandomOpponent::from_entropy())
}
