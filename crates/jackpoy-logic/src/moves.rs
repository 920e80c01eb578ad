//! Move catalog

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One of the seven selectable game pieces
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
    Nails,
    Hammer,
    Wood,
    Glue,
}

/// Every move in display order
const ALL_MOVES: [Move; 7] = [
    Move::Rock,
    Move::Paper,
    Move::Scissors,
    Move::Nails,
    Move::Hammer,
    Move::Wood,
    Move::Glue,
];

/// The fixed catalog of moves.
///
/// Order only matters for display; resolution never depends on it.
pub fn moves_list() -> &'static [Move] {
    &ALL_MOVES
}

/// Instruction text for one move, as shown next to the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MoveGuide {
    #[serde(rename = "move")]
    pub mv: &'static str,
    pub beats: &'static str,
    pub loses_to: &'static str,
}

impl Move {
    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
            Move::Nails => "nails",
            Move::Hammer => "hammer",
            Move::Wood => "wood",
            Move::Glue => "glue",
        }
    }

    /// Capitalized name for buttons and labels
    pub fn display_name(self) -> &'static str {
        match self {
            Move::Rock => "Rock",
            Move::Paper => "Paper",
            Move::Scissors => "Scissors",
            Move::Nails => "Nails",
            Move::Hammer => "Hammer",
            Move::Wood => "Wood",
            Move::Glue => "Glue",
        }
    }

    /// Position in the catalog
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable rules for this move.
    ///
    /// Flavour text only. Resolution goes through [`crate::RuleTable`].
    pub fn guide(self) -> MoveGuide {
        let (beats, loses_to) = match self {
            Move::Rock => (
                "Scissors (crushes), Wood (smashes)",
                "Paper (covers), Glue (sticks), Hammer (smashes rock)",
            ),
            Move::Paper => (
                "Rock (covers), Hammer (wraps)",
                "Scissors (cuts), Nails (pierce), Glue (sticks)",
            ),
            Move::Scissors => (
                "Paper (cuts), Glue (snips apart)",
                "Rock (crushes), Hammer (breaks), Nails (tougher)",
            ),
            Move::Nails => (
                "Paper (pierces), Scissors (stronger), Wood (drives into)",
                "Rock (bends), Hammer (pounds), Glue (sticks together)",
            ),
            Move::Hammer => (
                "Rock (smashes), Scissors (breaks), Nails (pounds)",
                "Paper (wraps), Glue (sticks), Wood (absorbs blows)",
            ),
            Move::Wood => (
                "Hammer (absorbs), Paper (covers)",
                "Rock (smashes), Nails (driven in), Scissors (cuts)",
            ),
            Move::Glue => (
                "Paper (sticks), Rock (sticks), Hammer (sticks)",
                "Scissors (snip apart), Nails (pierce), Wood (absorbs)",
            ),
        };
        MoveGuide { mv: self.display_name(), beats, loses_to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_MOVES
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EngineError::InvalidMove(s.to_string()))
    }
}
