//! Cook-Levin reduction: bounded acceptance to satisfiability
//!
//! One variable x[i,j,s] per tableau position (i, j) and cell symbol s.
//! The formula φ = φ_cell ∧ φ_start ∧ φ_move ∧ φ_accept is satisfiable iff
//! the machine accepts the input within t steps:
//!
//! - φ_cell: every position holds exactly one symbol
//! - φ_start: row 0 is the initial configuration
//! - φ_move: every 2×3 window is legal
//! - φ_accept: the last row contains an accept state

mod windows;

pub use windows::{legal_windows, Window};

use crate::formula::{Assignment, Formula};
use crate::machine::{State, Symbol, TuringMachine};
use crate::tableau::{Cell, Tableau};
use crate::ReductionError;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info};

/// Variable identifier: cell (row, col) holds `cell`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellVar {
    /// Tableau row (time step)
    pub row: usize,
    /// Tableau column
    pub col: usize,
    /// Cell symbol
    pub cell: Cell,
}

impl fmt::Display for CellVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x[{},{},{}]", self.row, self.col, self.cell)
    }
}

/// Reduction instance for one machine, input, and time bound
#[derive(Debug, Clone)]
pub struct Reduction {
    time_bound: usize,
    input: Vec<Symbol>,
    initial_state: State,
    accept_states: BTreeSet<State>,
    /// Cell alphabet C, sorted
    alphabet: Vec<Cell>,
    windows: BTreeSet<Window>,
}

impl Reduction {
    /// Prepare the reduction of `machine` on `input` with time bound t
    ///
    /// Fails with [`ReductionError::InvalidDirection`] if a transition does
    /// not move the head, and with [`ReductionError::OversizedTape`] if the
    /// input does not fit in t+1 cells.
    pub fn new(
        machine: &TuringMachine,
        input: &[Symbol],
        time_bound: usize,
    ) -> Result<Self, ReductionError> {
        if input.len() > time_bound + 1 {
            return Err(ReductionError::OversizedTape {
                length: input.len(),
                capacity: time_bound + 1,
            });
        }

        let mut gamma = machine.tape_alphabet();
        gamma.extend(input.iter().copied());

        let windows = legal_windows(machine.transitions(), &gamma, machine.accept_states())?;

        let mut alphabet: BTreeSet<Cell> = gamma.iter().copied().map(Cell::from).collect();
        alphabet.extend(machine.states().iter().copied().map(Cell::State));
        alphabet.insert(Cell::Boundary);

        debug!(
            rows = time_bound + 1,
            cols = time_bound + 4,
            symbols = alphabet.len(),
            windows = windows.len(),
            "allocated tableau variables"
        );

        Ok(Self {
            time_bound,
            input: input.to_vec(),
            initial_state: machine.initial_state(),
            accept_states: machine.accept_states().clone(),
            alphabet: alphabet.into_iter().collect(),
            windows,
        })
    }

    /// Time bound t
    pub fn time_bound(&self) -> usize {
        self.time_bound
    }

    /// Cell alphabet C
    pub fn alphabet(&self) -> &[Cell] {
        &self.alphabet
    }

    /// Legal windows used by φ_move
    pub fn windows(&self) -> &BTreeSet<Window> {
        &self.windows
    }

    /// Total variable count (t+1)(t+4)|C|
    pub fn num_variables(&self) -> usize {
        (self.time_bound + 1) * (self.time_bound + 4) * self.alphabet.len()
    }

    /// Variable x[row, col, cell]
    pub fn var(&self, row: usize, col: usize, cell: Cell) -> Formula<CellVar> {
        Formula::var(CellVar { row, col, cell })
    }

    fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        let cols = self.time_bound + 4;
        (0..=self.time_bound).flat_map(move |i| (0..cols).map(move |j| (i, j)))
    }

    /// Every position holds exactly one symbol of C
    pub fn phi_cell(&self) -> Formula<CellVar> {
        Formula::conjoin(self.positions().map(|(i, j)| {
            Formula::exactly_one(self.alphabet.iter().map(|&s| self.var(i, j, s)).collect())
        }))
    }

    /// Row 0 is `# q0 w1 ... wn _ ... _ #`
    pub fn phi_start(&self) -> Formula<CellVar> {
        let t = self.time_bound;
        let n = self.input.len();

        let mut clauses = vec![
            self.var(0, 0, Cell::Boundary),
            self.var(0, 1, Cell::State(self.initial_state)),
        ];
        clauses.extend(
            self.input
                .iter()
                .enumerate()
                .map(|(j, &s)| self.var(0, j + 2, Cell::Tape(s))),
        );
        clauses.extend((n + 2..t + 3).map(|j| self.var(0, j, Cell::BLANK)));
        clauses.push(self.var(0, t + 3, Cell::Boundary));

        Formula::conjoin(clauses)
    }

    /// Every 2×3 window between consecutive rows is legal
    pub fn phi_move(&self) -> Formula<CellVar> {
        let t = self.time_bound;
        Formula::conjoin((0..t).flat_map(|i| (0..=t).map(move |j| (i, j))).map(|(i, j)| {
            Formula::disjoin(self.windows.iter().map(|(top, bottom)| {
                Formula::conjoin((0..3).flat_map(|k| {
                    [
                        self.var(i, j + k, top[k]),
                        self.var(i + 1, j + k, bottom[k]),
                    ]
                }))
            }))
        }))
    }

    /// Some interior cell of the last row holds an accept state
    pub fn phi_accept(&self) -> Formula<CellVar> {
        let t = self.time_bound;
        Formula::disjoin((1..t + 2).flat_map(|j| {
            self.accept_states
                .iter()
                .map(move |&f| self.var(t, j, Cell::State(f)))
        }))
    }

    /// φ = φ_cell ∧ φ_start ∧ φ_move ∧ φ_accept
    pub fn formula(&self) -> Formula<CellVar> {
        let phi = Formula::conjoin([
            self.phi_cell(),
            self.phi_start(),
            self.phi_move(),
            self.phi_accept(),
        ]);
        info!(
            time_bound = self.time_bound,
            size = phi.size(),
            "constructed formula"
        );
        phi
    }

    /// One-hot assignment realizing `tableau`
    ///
    /// x[i,j,s] is true exactly when the tableau holds s at (i, j), for every
    /// s in C. Positions outside the tableau are all false.
    pub fn assignment_for(&self, tableau: &Tableau) -> Assignment<CellVar> {
        let mut assignment = Assignment::with_capacity(self.num_variables());
        for (i, j) in self.positions() {
            let realized = tableau.get(i, j);
            for &cell in &self.alphabet {
                assignment.insert(CellVar { row: i, col: j, cell }, realized == Some(cell));
            }
        }
        assignment
    }
}
