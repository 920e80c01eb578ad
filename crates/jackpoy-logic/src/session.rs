//! Select / reveal gate for frontends that delay showing the result
//!
//! The round is decided as soon as a move is selected. The result then sits
//! in a pending slot until the frontend reveals it, and no other selection is
//! accepted in the meantime. The scoreboard only moves on reveal.

use tracing::warn;

use crate::error::{EngineError, Result};
use crate::game::{MatchEngine, MatchState, MatchStatus, RoundResult};
use crate::moves::Move;
use crate::opponent::Opponent;

#[derive(Clone, Debug)]
pub struct Session<O> {
    engine: MatchEngine<O>,
    pending: Option<RoundResult>,
    revealed: Option<RoundResult>,
}

impl<O: Opponent> Session<O> {
    pub fn new(engine: MatchEngine<O>) -> Self {
        Self {
            engine,
            pending: None,
            revealed: None,
        }
    }

    /// Decide a round and hold it until [`Session::reveal`].
    pub fn select(&mut self, player_move: Move) -> Result<&RoundResult> {
        if self.pending.is_some() {
            warn!(%player_move, "selection rejected, previous round not revealed");
            return Err(EngineError::RoundInFlight);
        }

        let result = self.engine.play_round(player_move)?;
        Ok(&*self.pending.insert(result))
    }

    pub fn select_named(&mut self, name: &str) -> Result<&RoundResult> {
        let player_move: Move = name.parse()?;
        self.select(player_move)
    }
}

impl<O> Session<O> {
    /// Release the pending round, if any
    pub fn reveal(&mut self) -> Option<RoundResult> {
        let result = self.pending.take()?;
        self.revealed = Some(result);
        Some(result)
    }

    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_revealed(&self) -> Option<&RoundResult> {
        self.revealed.as_ref()
    }

    /// State as of the last revealed round
    pub fn scoreboard(&self) -> MatchState {
        match &self.revealed {
            Some(result) => result.state,
            None => MatchState::new(self.engine.config().max_rounds),
        }
    }

    pub fn status(&self) -> MatchStatus {
        self.scoreboard().status()
    }

    /// Drop any pending round and start a new match
    pub fn reset(&mut self) {
        self.pending = None;
        self.revealed = None;
        self.engine.reset();
    }

    pub fn engine(&self) -> &MatchEngine<O> {
        &self.engine
    }
}
