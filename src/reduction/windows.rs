//! Legal 2×3 windows
//!
//! A window is legal when row i+1's three cells can follow row i's three
//! cells under a single head move (or an accepting row holding still),
//! with every other column copied unchanged.
//!
//! Each move is described by an [`Event`]: the short run of cells it rewrites
//! (the core). Cells outside the core are context and are copied. The legal
//! windows are every 3-column slice that overlaps some core, with context
//! filled from Γ, plus the context-only slices where nothing changes.

use crate::machine::{Move, State, Symbol, Transition};
use crate::tableau::Cell;
use crate::ReductionError;
use std::collections::BTreeSet;

/// Top row cells and bottom row cells of a 2×3 window
pub type Window = ([Cell; 3], [Cell; 3]);

/// Cells rewritten by one step
#[derive(Debug, Clone)]
struct Event {
    top: Vec<Cell>,
    bottom: Vec<Cell>,
    /// Core starts at column 1, directly after the left boundary
    at_left_end: bool,
}

fn events(
    transitions: &[Transition],
    gamma: &BTreeSet<Symbol>,
    accept_states: &BTreeSet<State>,
) -> Result<Vec<Event>, ReductionError> {
    let mut events = Vec::new();

    for t in transitions {
        let (q, a, r, b) = (
            Cell::State(t.state),
            Cell::Tape(t.read),
            Cell::State(t.next_state),
            Cell::Tape(t.write),
        );
        match t.direction {
            // u q a v  =>  u b r v
            Move::Right => events.push(Event {
                top: vec![q, a],
                bottom: vec![b, r],
                at_left_end: false,
            }),
            // u x q a v  =>  u r x b v
            Move::Left => {
                for &x in gamma {
                    events.push(Event {
                        top: vec![Cell::Tape(x), q, a],
                        bottom: vec![r, Cell::Tape(x), b],
                        at_left_end: false,
                    });
                }
                // # q a v  =>  # r b v : the head cannot cross the left end
                events.push(Event {
                    top: vec![q, a],
                    bottom: vec![r, b],
                    at_left_end: true,
                });
            }
            Move::Stay => {
                return Err(ReductionError::InvalidDirection {
                    transition: t.to_string(),
                })
            }
        }
    }

    // Accepting rows may repeat unchanged
    for &f in accept_states {
        events.push(Event {
            top: vec![Cell::State(f)],
            bottom: vec![Cell::State(f)],
            at_left_end: false,
        });
    }

    Ok(events)
}

/// Context sequences of length `len`: cells of Γ, where the outermost cell
/// may also be the boundary marker.
fn contexts(len: usize, gamma: &BTreeSet<Symbol>) -> Vec<Vec<Cell>> {
    let mut out: Vec<Vec<Cell>> = vec![Vec::new()];
    for pos in 0..len {
        let outermost = pos + 1 == len;
        let mut next = Vec::new();
        for prefix in &out {
            for &s in gamma {
                let mut seq = prefix.clone();
                seq.push(Cell::Tape(s));
                next.push(seq);
            }
            if outermost {
                let mut seq = prefix.clone();
                seq.push(Cell::Boundary);
                next.push(seq);
            }
        }
        out = next;
    }
    out
}

fn push_window(windows: &mut BTreeSet<Window>, top: &[Cell], bottom: &[Cell]) {
    debug_assert_eq!(top.len(), 3);
    debug_assert_eq!(bottom.len(), 3);
    // Both ends boundary would mean a row three cells wide
    if top[0] == Cell::Boundary && top[2] == Cell::Boundary {
        return;
    }
    windows.insert(([top[0], top[1], top[2]], [bottom[0], bottom[1], bottom[2]]));
}

/// Every legal window for the given transition relation
///
/// Fails with [`ReductionError::InvalidDirection`] on a transition that does
/// not move the head.
pub fn legal_windows(
    transitions: &[Transition],
    gamma: &BTreeSet<Symbol>,
    accept_states: &BTreeSet<State>,
) -> Result<BTreeSet<Window>, ReductionError> {
    let mut windows = BTreeSet::new();

    // Nothing changes: no state in view
    for ctx in contexts(3, gamma) {
        for left_end in [false, true] {
            let mut cells = ctx.clone();
            if left_end {
                cells[0] = Cell::Boundary;
                if cells[2] == Cell::Boundary {
                    continue;
                }
            }
            push_window(&mut windows, &cells, &cells);
        }
    }

    for event in events(transitions, gamma, accept_states)? {
        let n = event.top.len() as isize;
        let first = if event.at_left_end { -1 } else { -2 };

        for start in first..n {
            let left_len = (-start).max(0) as usize;
            let right_len = (start + 3 - n).max(0) as usize;
            let lo = start.max(0) as usize;
            let hi = (start + 3).min(n) as usize;

            let lefts: Vec<Vec<Cell>> = match (event.at_left_end, left_len) {
                (_, 0) => vec![Vec::new()],
                (true, _) => vec![vec![Cell::Boundary]],
                (false, _) => contexts(left_len, gamma)
                    .into_iter()
                    .map(|mut seq| {
                        // contexts() grows outward; the left side reads inward
                        seq.reverse();
                        seq
                    })
                    .collect(),
            };

            for left in &lefts {
                // A `#` right context admits windows at column t+2, which a
                // run of at most t steps never reaches; they are harmless.
                for right in contexts(right_len, gamma) {
                    let mut top = left.clone();
                    top.extend_from_slice(&event.top[lo..hi]);
                    top.extend_from_slice(&right);

                    let mut bottom = left.clone();
                    bottom.extend_from_slice(&event.bottom[lo..hi]);
                    bottom.extend_from_slice(&right);

                    push_window(&mut windows, &top, &bottom);
                }
            }
        }
    }

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(ch: char) -> Cell {
        Cell::Tape(Symbol::Char(ch))
    }

    fn gamma() -> BTreeSet<Symbol> {
        [Symbol::Blank, Symbol::Char('0')].into_iter().collect()
    }

    fn right_move() -> Transition {
        Transition {
            state: 0,
            read: '0'.into(),
            next_state: 1,
            write: '0'.into(),
            direction: Move::Right,
        }
    }

    fn left_move() -> Transition {
        Transition {
            state: 0,
            read: '0'.into(),
            next_state: 1,
            write: Symbol::Blank,
            direction: Move::Left,
        }
    }

    #[test]
    fn test_contexts_allow_boundary_only_outermost() {
        let ctx = contexts(2, &gamma());
        // |Γ| * (|Γ| + 1)
        assert_eq!(ctx.len(), 6);
        assert!(ctx.iter().all(|seq| seq[0] != Cell::Boundary));
        assert_eq!(contexts(0, &gamma()), vec![Vec::<Cell>::new()]);
    }

    #[test]
    fn test_unaffected_windows_copy_top_row() {
        let windows = legal_windows(&[], &gamma(), &BTreeSet::new()).unwrap();
        assert!(windows.iter().all(|(top, bottom)| top == bottom));
        assert!(windows.contains(&(
            [Cell::Boundary, c('0'), Cell::BLANK],
            [Cell::Boundary, c('0'), Cell::BLANK]
        )));
        assert!(windows.iter().all(|(top, _)| !top[1].is_state()));
        // |Γ|^3 + 2|Γ|^2 middle-and-one-side combinations
        assert_eq!(windows.len(), 8 + 2 * 4);
    }

    #[test]
    fn test_right_move_windows() {
        let windows = legal_windows(&[right_move()], &gamma(), &BTreeSet::new()).unwrap();
        let q0 = Cell::State(0);
        let q1 = Cell::State(1);

        assert!(windows.contains(&(
            [Cell::Boundary, q0, c('0')],
            [Cell::Boundary, c('0'), q1]
        )));
        assert!(windows.contains(&([q0, c('0'), Cell::BLANK], [c('0'), q1, Cell::BLANK])));
        assert!(windows.contains(&([q0, c('0'), Cell::Boundary], [c('0'), q1, Cell::Boundary])));
        assert!(windows.contains(&(
            [c('0'), Cell::BLANK, Cell::BLANK],
            [q1, Cell::BLANK, Cell::BLANK]
        )));
        // A state cannot appear from nowhere
        assert!(!windows.contains(&(
            [Cell::BLANK, Cell::BLANK, Cell::BLANK],
            [q1, Cell::BLANK, Cell::BLANK]
        )));
    }

    #[test]
    fn test_left_move_at_left_end_keeps_head_in_place() {
        let windows = legal_windows(&[left_move()], &gamma(), &BTreeSet::new()).unwrap();
        let q0 = Cell::State(0);
        let q1 = Cell::State(1);

        assert!(windows.contains(&(
            [Cell::Boundary, q0, c('0')],
            [Cell::Boundary, q1, Cell::BLANK]
        )));
        // Interior left move: x q a => r x b
        assert!(windows.contains(&([c('0'), q0, c('0')], [q1, c('0'), Cell::BLANK])));
        // The head never replaces the boundary marker
        assert!(windows
            .iter()
            .all(|(top, bottom)| (top[0] == Cell::Boundary) == (bottom[0] == Cell::Boundary)));
    }

    #[test]
    fn test_accept_state_may_hold() {
        let accept: BTreeSet<State> = [1].into_iter().collect();
        let windows = legal_windows(&[], &gamma(), &accept).unwrap();
        let q1 = Cell::State(1);

        assert!(windows.contains(&([Cell::Boundary, q1, c('0')], [Cell::Boundary, q1, c('0')])));
        assert!(windows.contains(&([c('0'), c('0'), q1], [c('0'), c('0'), q1])));
        assert!(!windows.contains(&([Cell::State(0), c('0'), c('0')], [Cell::State(0), c('0'), c('0')])));
    }

    #[test]
    fn test_stay_is_invalid_direction() {
        let stay = Transition {
            direction: Move::Stay,
            ..right_move()
        };
        let result = legal_windows(&[stay], &gamma(), &BTreeSet::new());
        assert!(matches!(
            result,
            Err(ReductionError::InvalidDirection { .. })
        ));
    }
}
