//! # Cook-Levin Reduction
//!
//! This library reduces bounded acceptance of a nondeterministic single-tape
//! Turing machine to Boolean satisfiability.
//!
//! ## Core Algorithm
//!
//! 1. **Tableau**: a (t+1) × (t+4) grid, one row per time step
//! 2. **Variables**: one per (row, column, cell symbol) triple
//! 3. **Constraints**: one-hot cells, initial row, legal 2×3 windows, accepting last row
//! 4. **Validation**: a witness run, laid out as a tableau, satisfies the formula
//!
//! Result: φ is satisfiable iff the machine accepts the input within t steps.
//!
//! ## Usage Example
//!
//! ```ignore
//! use cooklevin::{Reducer, ReductionConfig};
//!
//! let reducer = Reducer::new(machine, ReductionConfig::for_time_bound(8));
//! let reduction = reducer.reduce(&input)?;
//! let phi = reduction.formula();
//! if let Some(tableau) = reducer.witness(&input)? {
//!     assert!(phi.evaluate(&reduction.assignment_for(&tableau))?);
//! }
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules
pub mod formula;    // Boolean formula engine
pub mod machine;    // Turing machine representation
pub mod reduction;  // Formula construction
pub mod tableau;    // Run layout as a grid

// Re-exports for convenience
pub use formula::{Assignment, Formula, DEFAULT_BRUTE_FORCE_LIMIT};
pub use machine::{word, Configuration, Move, State, Symbol, Transition, TuringMachine};
pub use reduction::{CellVar, Reduction};
pub use tableau::{Cell, Tableau};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during reduction
#[derive(Error, Debug)]
pub enum ReductionError {
    /// Run has no configurations, not even the initial one
    #[error("Run has no configurations")]
    EmptyRun,

    /// Run has more configurations than the tableau has rows
    #[error("Run of {configurations} configurations exceeds {rows} tableau rows")]
    OversizedRun {
        /// Configurations in the run
        configurations: usize,
        /// Rows available (t+1)
        rows: usize,
    },

    /// Tape contents do not fit between the boundary markers
    #[error("Tape of length {length} exceeds capacity {capacity}")]
    OversizedTape {
        /// Cells required
        length: usize,
        /// Cells available (t+1)
        capacity: usize,
    },

    /// Transition does not move the head left or right
    #[error("Invalid direction in transition {transition}")]
    InvalidDirection {
        /// Offending transition, rendered
        transition: String,
    },

    /// Evaluation reached a variable missing from the assignment
    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    /// Exhaustive search refused: too many variables
    #[error("Formula has {variables} variables, exhaustive search limited to {limit}")]
    TooManyVariables {
        /// Distinct variables in the formula
        variables: usize,
        /// Configured ceiling
        limit: usize,
    },

    /// Invalid machine definition
    #[error("Invalid machine: {0}")]
    InvalidMachine(String),

    /// Malformed machine description
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },
}

/// Configuration parameters for reduction
#[derive(Debug, Clone)]
pub struct ReductionConfig {
    /// Time bound t
    pub time_bound: usize,

    /// Maximum configurations explored by the witness search
    pub search_limit: usize,

    /// Variable ceiling for exhaustive satisfiability
    pub brute_force_limit: usize,

    /// Arguments shown per connective when pretty-printing
    pub display_limit: usize,
}

impl ReductionConfig {
    /// Default configuration for time bound t
    pub fn for_time_bound(time_bound: usize) -> Self {
        Self {
            time_bound,
            search_limit: 1_000_000,
            brute_force_limit: DEFAULT_BRUTE_FORCE_LIMIT,
            display_limit: 5,
        }
    }

    /// Set witness search limit
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Set exhaustive search ceiling
    pub fn with_brute_force_limit(mut self, limit: usize) -> Self {
        self.brute_force_limit = limit;
        self
    }

    /// Set pretty-print arity
    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    /// Tableau dimensions (rows, columns)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.time_bound + 1, self.time_bound + 4)
    }
}

/// Outcome of checking a formula against a witness and random assignments
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Steps in the shortest accepting run, if one exists within the bound
    pub witness_steps: Option<usize>,

    /// AST node count of φ
    pub formula_size: usize,

    /// Distinct variables of φ
    pub variables: usize,

    /// φ under the witness tableau's one-hot assignment
    pub witness_satisfies: Option<bool>,

    /// φ under randomized assignments with tableau positions forced true
    pub random_trials: Vec<bool>,
}

/// Main reduction orchestrator
///
/// Couples a machine with a configuration and drives the reduction,
/// the witness search, and the validation checks.
#[derive(Debug)]
pub struct Reducer {
    machine: TuringMachine,
    config: ReductionConfig,
}

impl Reducer {
    /// Create new reducer
    pub fn new(machine: TuringMachine, config: ReductionConfig) -> Self {
        Self { machine, config }
    }

    /// Get configuration
    pub fn config(&self) -> &ReductionConfig {
        &self.config
    }

    /// Prepare the reduction for `input`
    pub fn reduce(&self, input: &[Symbol]) -> Result<Reduction, ReductionError> {
        Reduction::new(&self.machine, input, self.config.time_bound)
    }

    /// Shortest accepting run within the time bound
    pub fn accepting_run(&self, input: &[Symbol]) -> Option<Vec<Configuration>> {
        machine::shortest_accepting_run(
            &self.machine,
            input,
            self.config.time_bound,
            self.config.search_limit,
        )
    }

    /// Tableau of a shortest accepting run, if one exists within the bound
    pub fn witness(&self, input: &[Symbol]) -> Result<Option<Tableau>, ReductionError> {
        self.accepting_run(input)
            .map(|run| Tableau::from_run(&run, self.config.time_bound))
            .transpose()
    }

    /// Exhaustive satisfiability of φ, subject to the variable ceiling
    pub fn solve(&self, input: &[Symbol]) -> Result<Option<Assignment<CellVar>>, ReductionError> {
        self.reduce(input)?
            .formula()
            .satisfying_assignment_within(self.config.brute_force_limit)
    }

    /// Evaluate φ on the witness assignment and on `trials` random ones
    ///
    /// Random trials draw every variable uniformly, then force the witness
    /// tableau's cells true. Without a witness no trials are run.
    pub fn check(
        &self,
        input: &[Symbol],
        trials: usize,
        seed: u64,
    ) -> Result<CheckReport, ReductionError> {
        let reduction = self.reduce(input)?;
        let phi = reduction.formula();
        let run = self.accepting_run(input);

        let mut report = CheckReport {
            witness_steps: None,
            formula_size: phi.size(),
            variables: reduction.num_variables(),
            witness_satisfies: None,
            random_trials: Vec::new(),
        };

        let Some(run) = run else {
            info!("no accepting run within bound; skipping assignment checks");
            return Ok(report);
        };
        let tableau = Tableau::from_run(&run, self.config.time_bound)?;

        report.witness_steps = Some(run.len() - 1);
        report.witness_satisfies = Some(phi.evaluate(&reduction.assignment_for(&tableau))?);

        let mut rng = StdRng::seed_from_u64(seed);
        let vars = phi.variables();
        for _ in 0..trials {
            let mut assignment: Assignment<CellVar> =
                vars.iter().map(|&v| (v, rng.gen::<bool>())).collect();
            for (row, col, cell) in tableau.cells() {
                assignment.insert(CellVar { row, col, cell }, true);
            }
            report.random_trials.push(phi.evaluate(&assignment)?);
        }

        info!(
            witness_satisfies = ?report.witness_satisfies,
            satisfied_trials = report.random_trials.iter().filter(|b| **b).count(),
            trials,
            "check complete"
        );
        Ok(report)
    }
}
