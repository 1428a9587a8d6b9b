//! Configuration (instantaneous description) of a single-tape machine
//!
//! Represents complete state at a point in time:
//! - Control state q ∈ Q
//! - Head position (index into the tape)
//! - Tape contents, dense from the left end

use super::{State, Symbol, Transition};
use std::fmt;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Complete instantaneous description of machine
///
/// Cells at or beyond `tape.len()` are implicitly blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Configuration {
    /// Current control state
    state: State,

    /// Written tape prefix
    tape: Vec<Symbol>,

    /// Head position
    head: usize,
}

impl Configuration {
    /// Create initial configuration: head on the leftmost input cell
    pub fn initial(state: State, input: &[Symbol]) -> Self {
        Self {
            state,
            tape: input.to_vec(),
            head: 0,
        }
    }

    /// Create configuration from explicit parts
    pub fn new(state: State, tape: Vec<Symbol>, head: usize) -> Self {
        Self { state, tape, head }
    }

    /// Get current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Get tape contents
    pub fn tape(&self) -> &[Symbol] {
        &self.tape
    }

    /// Get head position
    pub fn head(&self) -> usize {
        self.head
    }

    /// Read symbol under the head
    pub fn read(&self) -> Symbol {
        self.tape.get(self.head).copied().unwrap_or(Symbol::Blank)
    }

    /// Successor configuration after applying `transition`
    ///
    /// The caller is responsible for checking that the transition matches
    /// the current state and the symbol under the head.
    pub fn apply(&self, transition: &Transition) -> Self {
        let mut tape = self.tape.clone();
        if self.head < tape.len() {
            tape[self.head] = transition.write;
        } else {
            tape.resize(self.head, Symbol::Blank);
            tape.push(transition.write);
        }

        Self {
            state: transition.next_state,
            tape,
            head: transition.direction.apply(self.head),
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.tape[..self.head.min(self.tape.len())] {
            write!(f, "{}", symbol)?;
        }
        write!(f, "[q{}]", self.state)?;
        for symbol in self.tape.iter().skip(self.head) {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
