//! Tableau: one row per time step of a bounded computation
//!
//! For time bound t the grid has t+1 rows and t+4 columns. Row i is
//! `# u q v _ ... _ #`: the tape left of the head, the state, the tape from
//! the head rightward, blank padding, and boundary markers at both ends.
//! Runs shorter than t steps repeat their final row.

use crate::machine::{Configuration, State, Symbol};
use crate::ReductionError;
use std::fmt;

#[cfg(feature = "visualize")]
use serde::{Deserialize, Serialize};

/// Element of the cell alphabet C = Γ ∪ Q ∪ {#}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub enum Cell {
    /// Boundary marker `#`
    Boundary,
    /// Tape symbol
    Tape(Symbol),
    /// Control state, placed immediately left of the scanned cell
    State(State),
}

impl Cell {
    /// Blank tape cell
    pub const BLANK: Cell = Cell::Tape(Symbol::Blank);

    /// Whether this cell holds a control state
    pub fn is_state(&self) -> bool {
        matches!(self, Cell::State(_))
    }
}

impl From<Symbol> for Cell {
    fn from(symbol: Symbol) -> Self {
        Cell::Tape(symbol)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Boundary => f.write_str("#"),
            Cell::Tape(symbol) => write!(f, "{}", symbol),
            Cell::State(q) => write!(f, "q{}", q),
        }
    }
}

/// Fixed-size grid of cells for time bound t
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(Serialize, Deserialize))]
pub struct Tableau {
    /// Time bound t
    time_bound: usize,

    /// t+1 rows of t+4 cells each
    rows: Vec<Vec<Cell>>,
}

impl Tableau {
    /// Lay out `run` in a (t+1) × (t+4) grid
    ///
    /// Fails with [`ReductionError::EmptyRun`] on a run without configurations,
    /// with [`ReductionError::OversizedRun`] when the run has more than
    /// t+1 configurations, and with [`ReductionError::OversizedTape`] when a
    /// configuration's tape does not fit in t+1 cells.
    pub fn from_run(run: &[Configuration], time_bound: usize) -> Result<Self, ReductionError> {
        if run.is_empty() {
            return Err(ReductionError::EmptyRun);
        }
        if run.len() > time_bound + 1 {
            return Err(ReductionError::OversizedRun {
                configurations: run.len(),
                rows: time_bound + 1,
            });
        }

        let mut rows = Vec::with_capacity(time_bound + 1);
        for config in run {
            rows.push(Self::row(config, time_bound)?);
        }

        // Hold the final configuration for the remaining steps
        let last = rows[rows.len() - 1].clone();
        rows.resize(time_bound + 1, last);

        Ok(Self { time_bound, rows })
    }

    fn row(config: &Configuration, time_bound: usize) -> Result<Vec<Cell>, ReductionError> {
        let tape = config.tape();
        let capacity = time_bound + 1;
        if tape.len() > capacity || config.head() > capacity {
            return Err(ReductionError::OversizedTape {
                length: tape.len().max(config.head()),
                capacity,
            });
        }

        let head = config.head().min(tape.len());
        let mut row = Vec::with_capacity(time_bound + 4);
        row.push(Cell::Boundary);
        row.extend(tape[..head].iter().copied().map(Cell::from));
        // A head past the written prefix sits on blanks
        row.extend(std::iter::repeat(Cell::BLANK).take(config.head() - head));
        row.push(Cell::State(config.state()));
        row.extend(tape[head..].iter().copied().map(Cell::from));
        row.resize(time_bound + 3, Cell::BLANK);
        row.push(Cell::Boundary);
        Ok(row)
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Number of columns (t+4)
    pub fn width(&self) -> usize {
        self.time_bound + 4
    }

    /// Iterate `(row, col, cell)` over every position
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(i, row)| {
            row.iter().enumerate().map(move |(j, cell)| (i, j, *cell))
        })
    }
}

impl fmt::Display for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(Cell::to_string).collect())
            .collect();
        let width = rendered
            .iter()
            .flatten()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(1);

        for row in &rendered {
            let line: Vec<String> = row.iter().map(|s| format!("{:>width$}", s)).collect();
            writeln!(f, "{}", line.join(" ").trim_end())?;
        }
        Ok(())
    }
}
