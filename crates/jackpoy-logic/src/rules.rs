//! Win/lose rule table
//!
//! Each move carries its own `beats` and `loses_to` lists. The lists are
//! hand-authored and are not mirror images of each other: rock has no opinion
//! about nails, and nails and glue each claim to lose to the other. Resolution
//! only ever reads the acting move's entry and falls back to a tie for pairs
//! that entry does not mention.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::moves::{moves_list, Move};

/// Result of comparing two moves from the first move's perspective
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    PlayerWins,
    ComputerWins,
    Tie,
}

impl RoundOutcome {
    /// The same outcome seen from the other side
    pub fn inverse(self) -> Self {
        match self {
            RoundOutcome::PlayerWins => RoundOutcome::ComputerWins,
            RoundOutcome::ComputerWins => RoundOutcome::PlayerWins,
            RoundOutcome::Tie => RoundOutcome::Tie,
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoundOutcome::PlayerWins => "You win!",
            RoundOutcome::ComputerWins => "Computer wins!",
            RoundOutcome::Tie => "It's a tie!",
        })
    }
}

/// What a single move beats and loses to
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub beats: Vec<Move>,
    pub loses_to: Vec<Move>,
}

impl RuleEntry {
    pub fn new(beats: &[Move], loses_to: &[Move]) -> Self {
        Self {
            beats: beats.to_vec(),
            loses_to: loses_to.to_vec(),
        }
    }

    /// Whether this entry says anything about `other`
    pub fn covers(&self, other: Move) -> bool {
        self.beats.contains(&other) || self.loses_to.contains(&other)
    }
}

/// A pair of moves whose two entries do not agree with each other
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Disagreement {
    pub a: Move,
    pub b: Move,
    /// `relation(a, b)`
    pub a_view: RoundOutcome,
    /// `relation(b, a)`
    pub b_view: RoundOutcome,
}

/// Mapping from each move to its [`RuleEntry`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    entries: BTreeMap<Move, RuleEntry>,
}

impl RuleTable {
    /// The game's table, exactly as authored
    pub fn standard() -> Self {
        use Move::*;

        Self::from_entries([
            (Rock, RuleEntry::new(&[Scissors, Wood], &[Paper, Glue, Hammer])),
            (Paper, RuleEntry::new(&[Rock, Hammer], &[Scissors, Nails, Glue])),
            (Scissors, RuleEntry::new(&[Paper, Glue], &[Rock, Hammer, Nails])),
            (Nails, RuleEntry::new(&[Paper, Scissors, Wood], &[Rock, Hammer, Glue])),
            (Hammer, RuleEntry::new(&[Rock, Scissors, Nails], &[Paper, Glue, Wood])),
            (Wood, RuleEntry::new(&[Hammer, Paper], &[Rock, Nails, Scissors])),
            (Glue, RuleEntry::new(&[Paper, Rock, Hammer], &[Scissors, Nails, Wood])),
        ])
    }

    /// Build a table from arbitrary entries. Moves without an entry make
    /// [`RuleTable::relation`] fail when they act.
    pub fn from_entries(entries: impl IntoIterator<Item = (Move, RuleEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn entry(&self, mv: Move) -> Option<&RuleEntry> {
        self.entries.get(&mv)
    }

    /// Outcome of `mover` against `other`, read from `mover`'s entry only.
    pub fn relation(&self, mover: Move, other: Move) -> Result<RoundOutcome> {
        let entry = self
            .entry(mover)
            .ok_or_else(|| EngineError::InvalidMove(mover.to_string()))?;

        if mover == other {
            return Ok(RoundOutcome::Tie);
        }
        if entry.beats.contains(&other) {
            return Ok(RoundOutcome::PlayerWins);
        }
        if entry.loses_to.contains(&other) {
            return Ok(RoundOutcome::ComputerWins);
        }

        debug!(%mover, %other, "pair not covered by rule table, scoring as tie");
        Ok(RoundOutcome::Tie)
    }

    /// Ordered pairs `(a, b)` where `b` is missing from both of `a`'s lists
    pub fn uncovered(&self) -> Vec<(Move, Move)> {
        self.entries
            .iter()
            .flat_map(|(&a, entry)| {
                moves_list()
                    .iter()
                    .copied()
                    .filter(move |&b| b != a && !entry.covers(b))
                    .map(move |b| (a, b))
            })
            .collect()
    }

    /// Unordered pairs where `relation(a, b)` is not the inverse of
    /// `relation(b, a)`. Pairs involving a move with no entry are skipped.
    pub fn disagreements(&self) -> Vec<Disagreement> {
        let moves = moves_list();
        let mut found = Vec::new();

        for (i, &a) in moves.iter().enumerate() {
            for &b in &moves[i + 1..] {
                let (Ok(a_view), Ok(b_view)) = (self.relation(a, b), self.relation(b, a)) else {
                    continue;
                };
                if a_view.inverse() != b_view {
                    found.push(Disagreement { a, b, a_view, b_view });
                }
            }
        }

        found
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_table() -> &'static RuleTable {
    static TABLE: OnceLock<RuleTable> = OnceLock::new();
    TABLE.get_or_init(RuleTable::standard)
}

/// [`RuleTable::relation`] against the standard table
pub fn relation(mover: Move, other: Move) -> Result<RoundOutcome> {
    standard_table().relation(mover, other)
}
