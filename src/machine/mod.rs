//! Turing machine representation and execution
//!
//! Provides abstractions for nondeterministic single-tape Turing machines:
//! - One-way infinite tape with a left end
//! - Finite alphabet Γ containing the blank
//! - Finite state set Q with a start state and accept states
//! - Transition relation δ (several rules may share a (q, a) pair)

mod config;
mod format;
mod search;
mod transition;

pub use config::Configuration;
pub use search::shortest_accepting_run;
pub use transition::{Move, Transition};

use crate::ReductionError;
use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Tape symbol (element of alphabet Γ)
///
/// The blank is its own variant so that no ordinary character can be
/// mistaken for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub enum Symbol {
    /// Blank cell
    Blank,
    /// Ordinary alphabet symbol
    Char(char),
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Blank => f.write_str("_"),
            Symbol::Char(c) => write!(f, "{}", c),
        }
    }
}

/// Convert a string of characters into tape symbols
pub fn word(s: &str) -> Vec<Symbol> {
    s.chars().map(Symbol::Char).collect()
}

/// Machine state (element of Q)
pub type State = u32;

/// Nondeterministic single-tape Turing machine
#[derive(Debug, Clone)]
pub struct TuringMachine {
    /// Declared alphabet (may be empty; symbols used by δ are added implicitly)
    alphabet: BTreeSet<Symbol>,

    /// Set of states Q
    states: BTreeSet<State>,

    /// Initial state q_0
    initial_state: State,

    /// Accept states F ⊆ Q
    accept_states: BTreeSet<State>,

    /// Transition relation δ, in insertion order
    transitions: Vec<Transition>,
}

impl TuringMachine {
    /// Create fluent builder
    pub fn builder() -> TuringMachineBuilder {
        TuringMachineBuilder::new()
    }

    /// Get initial state
    pub fn initial_state(&self) -> State {
        self.initial_state
    }

    /// Get accept states
    pub fn accept_states(&self) -> &BTreeSet<State> {
        &self.accept_states
    }

    /// Get all states
    pub fn states(&self) -> &BTreeSet<State> {
        &self.states
    }

    /// Get the full transition relation
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Transitions applicable in `state` reading `symbol`
    pub fn transitions_from(
        &self,
        state: State,
        symbol: Symbol,
    ) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions
            .iter()
            .filter(move |t| t.state == state && t.read == symbol)
    }

    /// Tape alphabet Γ: blank, declared symbols, and every symbol δ reads or writes
    pub fn tape_alphabet(&self) -> BTreeSet<Symbol> {
        let mut gamma = self.alphabet.clone();
        gamma.insert(Symbol::Blank);
        for t in &self.transitions {
            gamma.insert(t.read);
            gamma.insert(t.write);
        }
        gamma
    }

    /// Check if state is accepting
    pub fn is_accepting(&self, state: State) -> bool {
        self.accept_states.contains(&state)
    }

    /// All configurations reachable in one step
    pub fn successors(&self, config: &Configuration) -> Vec<Configuration> {
        self.transitions_from(config.state(), config.read())
            .map(|t| config.apply(t))
            .collect()
    }
}

/// Builder for Turing machines (fluent API)
#[derive(Debug)]
pub struct TuringMachineBuilder {
    alphabet: Vec<Symbol>,
    initial_state: Option<State>,
    accept_states: Vec<State>,
    transitions: Vec<Transition>,
}

impl TuringMachineBuilder {
    /// Create new builder
    pub fn new() -> Self {
        Self {
            alphabet: Vec::new(),
            initial_state: None,
            accept_states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Declare alphabet symbols
    pub fn alphabet(mut self, alphabet: Vec<Symbol>) -> Self {
        self.alphabet.extend(alphabet);
        self
    }

    /// Set initial state
    pub fn initial_state(mut self, state: State) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Add an accept state
    pub fn accept_state(mut self, state: State) -> Self {
        self.accept_states.push(state);
        self
    }

    /// Add a transition rule
    pub fn add_transition(
        mut self,
        from_state: State,
        read: Symbol,
        to_state: State,
        write: Symbol,
        direction: Move,
    ) -> Self {
        self.transitions.push(Transition {
            state: from_state,
            read,
            next_state: to_state,
            write,
            direction,
        });
        self
    }

    /// Build the Turing machine
    pub fn build(self) -> Result<TuringMachine, ReductionError> {
        let initial_state = self
            .initial_state
            .ok_or_else(|| ReductionError::InvalidMachine("Initial state not set".to_string()))?;

        if self.accept_states.is_empty() {
            return Err(ReductionError::InvalidMachine(
                "No accept state set".to_string(),
            ));
        }

        // Collect all states
        let mut states = BTreeSet::from([initial_state]);
        states.extend(self.accept_states.iter().copied());
        for t in &self.transitions {
            states.insert(t.state);
            states.insert(t.next_state);
        }

        Ok(TuringMachine {
            alphabet: self.alphabet.into_iter().collect(),
            states,
            initial_state,
            accept_states: self.accept_states.into_iter().collect(),
            transitions: self.transitions,
        })
    }
}
