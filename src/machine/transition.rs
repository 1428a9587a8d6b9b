//! Transition relation δ ⊆ Q × Γ × Q × Γ × {L,R}

use super::{State, Symbol};
use std::fmt;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Single transition rule (q, a, r, b, d)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Transition {
    /// Current state q
    pub state: State,

    /// Symbol read a
    pub read: Symbol,

    /// Next state r
    pub next_state: State,

    /// Symbol written b
    pub write: Symbol,

    /// Head movement d
    pub direction: Move,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "q{} {} -> q{} {} {}",
            self.state, self.read, self.next_state, self.write, self.direction
        )
    }
}

/// Head movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub enum Move {
    /// Move left (decrement position, saturating at the left end)
    Left,

    /// Move right (increment position)
    Right,

    /// Stay (no movement). Not expressible in the tableau encoding.
    Stay,
}

impl Move {
    /// Apply move to position
    ///
    /// The tape is one-way infinite: a left move from cell 0 stays at cell 0.
    pub fn apply(&self, position: usize) -> usize {
        match self {
            Move::Left => position.saturating_sub(1),
            Move::Right => position + 1,
            Move::Stay => position,
        }
    }

    /// Decode from integer offset
    pub fn from_i8(val: i8) -> Option<Self> {
        match val {
            -1 => Some(Move::Left),
            1 => Some(Move::Right),
            0 => Some(Move::Stay),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Move::Left => "L",
            Move::Right => "R",
            Move::Stay => "S",
        };
        f.write_str(token)
    }
}
