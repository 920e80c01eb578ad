//! Computer opponent move selection

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{EngineError, Result};
use crate::moves::{moves_list, Move};

/// Chooses the computer's move for a round
pub trait Opponent {
    /// Pick one of `moves`. The engine always passes the full catalog.
    fn choose(&mut self, moves: &[Move]) -> Move;
}

/// Picks uniformly at random, independently each round.
/// Not suitable for anything security related.
#[derive(Clone, Debug)]
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Reproducible opponent for replays and tests
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::new(StdRng::from_seed(*seed))
    }

    /// Seeded from operating-system entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl Opponent for RandomOpponent {
    /// An empty pool means no restriction: the whole catalog is used.
    fn choose(&mut self, moves: &[Move]) -> Move {
        let pool = if moves.is_empty() { moves_list() } else { moves };
        *pool
            .choose(&mut self.rng)
            .unwrap_or(&Move::Rock)
    }
}

/// Plays a fixed sequence of moves, starting over when it runs out
#[derive(Clone, Debug)]
pub struct ScriptedOpponent {
    script: Vec<Move>,
    next: usize,
}

impl ScriptedOpponent {
    pub fn new(script: Vec<Move>) -> Result<Self> {
        if script.is_empty() {
            return Err(EngineError::EmptyScript);
        }
        Ok(Self { script, next: 0 })
    }

    /// Parse a script from move names
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let script = names
            .iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<Vec<Move>>>()?;
        Self::new(script)
    }
}

impl Opponent for ScriptedOpponent {
    fn choose(&mut self, _moves: &[Move]) -> Move {
        let mv = self.script[self.next];
        self.next = (self.next + 1) % self.script.len();
        mv
    }
}

impl<O: Opponent + ?Sized> Opponent for Box<O> {
    fn choose(&mut self, moves: &[Move]) -> Move {
        (**self).choose(moves)
    }
}
