//! Shortest accepting run via breadth-first search
//!
//! Explores the configuration graph level by level, so the first accepting
//! configuration found ends a run with the fewest steps.

use super::{Configuration, Symbol, TuringMachine};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, warn};

/// Find a shortest accepting run of `machine` on `input`
///
/// Returns the sequence of configurations from the initial configuration to
/// the first accepting one, using at most `max_steps` transitions, or `None`
/// when no such run exists. At most `search_limit` distinct configurations
/// are explored; hitting the limit also yields `None`.
pub fn shortest_accepting_run(
    machine: &TuringMachine,
    input: &[Symbol],
    max_steps: usize,
    search_limit: usize,
) -> Option<Vec<Configuration>> {
    let start = Configuration::initial(machine.initial_state(), input);

    // Each discovered configuration maps to its predecessor
    let mut parents: HashMap<Configuration, Option<Configuration>> = HashMap::new();
    parents.insert(start.clone(), None);

    let mut frontier = VecDeque::new();
    frontier.push_back((start, 0usize));

    while let Some((config, depth)) = frontier.pop_front() {
        if machine.is_accepting(config.state()) {
            let run = trace_back(&parents, config);
            debug!(explored = parents.len(), steps = run.len() - 1, "accepting run found");
            return Some(run);
        }

        if depth == max_steps {
            continue;
        }

        for next in machine.successors(&config) {
            if parents.contains_key(&next) {
                continue;
            }
            if parents.len() >= search_limit {
                warn!(search_limit, "run search truncated at configuration limit");
                return None;
            }
            parents.insert(next.clone(), Some(config.clone()));
            frontier.push_back((next, depth + 1));
        }
    }

    debug!(explored = parents.len(), max_steps, "no accepting run within bound");
    None
}

fn trace_back(
    parents: &HashMap<Configuration, Option<Configuration>>,
    last: Configuration,
) -> Vec<Configuration> {
    let mut run = vec![last];
    while let Some(Some(prev)) = run.last().and_then(|c| parents.get(c)) {
        run.push(prev.clone());
    }
    run.reverse();
    run
}
