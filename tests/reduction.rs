//! End-to-end reduction tests: witness tableaux satisfy φ, corruptions do not

use cooklevin::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_case::test_case;
use test_helpers::*;

fn tape(c: char) -> Cell {
    Cell::Tape(Symbol::Char(c))
}

fn witness(machine: &TuringMachine, input: &str, time_bound: usize) -> (Reduction, Tableau) {
    let reducer = Reducer::new(machine.clone(), ReductionConfig::for_time_bound(time_bound));
    let input = word(input);
    let tableau = reducer
        .witness(&input)
        .expect("tableau fits")
        .expect("machine accepts within bound");
    let reduction = reducer.reduce(&input).expect("reduction succeeds");
    (reduction, tableau)
}

#[test_case(create_one_step_machine(), "0", 1 ; "single right move")]
#[test_case(create_one_step_machine(), "0", 3 ; "accepting row held")]
#[test_case(create_left_end_machine(), "1", 2 ; "left move at left end")]
#[test_case(create_bounce_machine(), "01", 3 ; "interior left move")]
#[test_case(create_bounce_machine(), "001", 5 ; "longer scan")]
#[test_case(create_guess_machine(), "101", 4 ; "nondeterministic guess")]
fn test_witness_tableau_satisfies_formula(machine: TuringMachine, input: &str, t: usize) {
    let (reduction, tableau) = witness(&machine, input, t);
    let phi = reduction.formula();

    let assignment = reduction.assignment_for(&tableau);
    assert!(phi.evaluate(&assignment).unwrap());
    assert!(reduction.phi_cell().evaluate(&assignment).unwrap());
    assert!(reduction.phi_start().evaluate(&assignment).unwrap());
    assert!(reduction.phi_move().evaluate(&assignment).unwrap());
    assert!(reduction.phi_accept().evaluate(&assignment).unwrap());
}

#[test_case(create_one_step_machine(), "0", 1)]
#[test_case(create_one_step_machine(), "0", 2)]
#[test_case(create_left_end_machine(), "1", 2)]
#[test_case(create_bounce_machine(), "01", 3)]
fn test_single_cell_substitution_breaks_formula(machine: TuringMachine, input: &str, t: usize) {
    // Deterministic machines with no moves out of the accept state have a
    // unique accepting tableau, so every substitution must be rejected.
    let (reduction, tableau) = witness(&machine, input, t);
    let phi = reduction.formula();
    let base = reduction.assignment_for(&tableau);

    for (row, col, realized) in tableau.cells() {
        for &other in reduction.alphabet() {
            if other == realized {
                continue;
            }
            let mut assignment = base.clone();
            assignment.insert(CellVar { row, col, cell: realized }, false);
            assignment.insert(CellVar { row, col, cell: other }, true);
            assert!(
                !phi.evaluate(&assignment).unwrap(),
                "substituting {} at ({}, {}) should break the formula",
                other,
                row,
                col
            );
        }
    }
}

#[test]
fn test_second_symbol_in_cell_breaks_formula() {
    let (reduction, tableau) = witness(&create_bounce_machine(), "01", 3);
    let phi = reduction.formula();
    let mut assignment = reduction.assignment_for(&tableau);

    assignment.insert(CellVar { row: 2, col: 4, cell: tape('1') }, true);
    assert!(!reduction.phi_cell().evaluate(&assignment).unwrap());
    assert!(!phi.evaluate(&assignment).unwrap());
}

#[test]
fn test_random_assignments_violate_one_hot() {
    let (reduction, tableau) = witness(&create_bounce_machine(), "01", 3);
    let phi = reduction.formula();
    let vars = phi.variables();
    assert!(vars.len() >= 20);

    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..10 {
        let mut assignment: Assignment<CellVar> =
            vars.iter().map(|&v| (v, rng.gen::<bool>())).collect();
        for (row, col, cell) in tableau.cells() {
            assignment.insert(CellVar { row, col, cell }, true);
        }

        let one_hot = assignment
            .iter()
            .filter(|(_, value)| **value)
            .all(|(v, _)| tableau.get(v.row, v.col) == Some(v.cell));
        assert_eq!(phi.evaluate(&assignment).unwrap(), one_hot);
    }
}

#[test]
fn test_reducer_check_reports_witness() {
    let reducer = Reducer::new(create_bounce_machine(), ReductionConfig::for_time_bound(3));
    let report = reducer.check(&word("01"), 5, 7).unwrap();

    assert_eq!(report.witness_steps, Some(3));
    assert_eq!(report.witness_satisfies, Some(true));
    assert_eq!(report.random_trials.len(), 5);
    assert!(report.random_trials.iter().all(|b| !b));
}

#[test]
fn test_reducer_check_without_witness() {
    let reducer = Reducer::new(create_bounce_machine(), ReductionConfig::for_time_bound(2));
    let report = reducer.check(&word("11"), 5, 7).unwrap();

    assert_eq!(report.witness_steps, None);
    assert_eq!(report.witness_satisfies, None);
    assert!(report.random_trials.is_empty());
}

#[test]
fn test_one_step_scenario() {
    let (reduction, tableau) = witness(&create_one_step_machine(), "0", 1);

    assert_eq!(
        tableau.rows()[0],
        vec![Cell::Boundary, Cell::State(0), tape('0'), Cell::BLANK, Cell::Boundary]
    );
    assert_eq!(
        tableau.rows()[1],
        vec![Cell::Boundary, tape('0'), Cell::State(1), Cell::BLANK, Cell::Boundary]
    );

    // Fix everything except row 1, columns 1-2, and search the rest exhaustively
    let full = reduction.assignment_for(&tableau);
    let partial: Assignment<CellVar> = full
        .iter()
        .filter(|(v, _)| !(v.row == 1 && (v.col == 1 || v.col == 2)))
        .map(|(v, b)| (*v, *b))
        .collect();

    let phi = reduction.formula();
    let remainder = phi.restrict(&partial);
    assert!(remainder.variables().len() <= 12);

    let found = remainder
        .satisfying_assignment()
        .unwrap()
        .expect("formula is satisfiable");
    let accept = CellVar { row: 1, col: 2, cell: Cell::State(1) };
    assert_eq!(found.get(&accept), Some(&true));
    assert_eq!(found.get(&CellVar { row: 1, col: 1, cell: tape('0') }), Some(&true));

    let mut completed = partial.clone();
    completed.extend(found);
    assert!(phi.evaluate(&completed).unwrap());
}

#[test]
fn test_rejected_input_has_no_completion() {
    let machine = create_one_step_machine();
    let reducer = Reducer::new(machine, ReductionConfig::for_time_bound(1));
    let input = word("1");
    assert!(reducer.witness(&input).unwrap().is_none());

    let reduction = reducer.reduce(&input).unwrap();
    let phi = reduction.formula();

    // Row 0 as forced by φ_start, row 1 boundary and trailing blank as copied
    let row0 = [Cell::Boundary, Cell::State(0), tape('1'), Cell::BLANK, Cell::Boundary];
    let mut partial = Assignment::new();
    for &cell in reduction.alphabet() {
        for (col, realized) in row0.iter().enumerate() {
            partial.insert(CellVar { row: 0, col, cell }, cell == *realized);
        }
        for (col, realized) in [(0, Cell::Boundary), (3, Cell::BLANK), (4, Cell::Boundary)] {
            partial.insert(CellVar { row: 1, col, cell }, cell == realized);
        }
    }

    let remainder = phi.restrict(&partial);
    assert_eq!(remainder.satisfying_assignment().unwrap(), None);
}

#[test]
fn test_trivial_reduction_is_solved_exhaustively() {
    let reducer = Reducer::new(create_trivial_machine(), ReductionConfig::for_time_bound(0));
    let input = word("");

    let reduction = reducer.reduce(&input).unwrap();
    assert_eq!(reduction.num_variables(), 12);

    let found = reducer.solve(&input).unwrap().expect("start state accepts");
    let mut holding: Vec<CellVar> = found
        .into_iter()
        .filter_map(|(v, b)| b.then_some(v))
        .collect();
    holding.sort();

    let expected: Vec<CellVar> = [Cell::Boundary, Cell::State(0), Cell::BLANK, Cell::Boundary]
        .into_iter()
        .enumerate()
        .map(|(col, cell)| CellVar { row: 0, col, cell })
        .collect();
    assert_eq!(holding, expected);
}

#[test]
fn test_solve_refuses_large_formulas() {
    let reducer = Reducer::new(create_bounce_machine(), ReductionConfig::for_time_bound(3));
    let result = reducer.solve(&word("01"));
    assert!(matches!(result, Err(ReductionError::TooManyVariables { .. })));
}

#[test]
fn test_oversized_run_is_rejected() {
    let machine = create_bounce_machine();
    let run = machine::shortest_accepting_run(&machine, &word("001"), 10, 1000).unwrap();
    assert_eq!(run.len(), 5);

    let result = Tableau::from_run(&run, 3);
    assert!(matches!(result, Err(ReductionError::OversizedRun { .. })));
}

#[test]
fn test_unbound_variable_in_partial_assignment() {
    let (reduction, _) = witness(&create_one_step_machine(), "0", 1);
    let result = reduction.formula().evaluate(&Assignment::new());
    assert!(matches!(result, Err(ReductionError::UnboundVariable(_))));
}
