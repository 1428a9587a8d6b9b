use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cooklevin::{word, Reducer, ReductionConfig, Symbol, TuringMachine};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cooklevin",
    about = "Reduce bounded Turing machine acceptance to Boolean satisfiability"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct Instance {
    /// Machine description file.
    machine: PathBuf,
    /// Input word (one character per tape cell).
    #[arg(long, default_value = "")]
    input: String,
    /// Time bound t: the tableau has t+1 rows and t+4 columns.
    #[arg(long, short = 't')]
    time_bound: usize,
    /// Maximum configurations explored when searching for an accepting run.
    #[arg(long, default_value_t = 1_000_000)]
    search_limit: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tableau of a shortest accepting run.
    Tableau {
        #[command(flatten)]
        instance: Instance,
    },
    /// Build the formula and print its statistics and a truncated rendering.
    Formula {
        #[command(flatten)]
        instance: Instance,
        /// Arguments shown per connective.
        #[arg(long, default_value_t = 5)]
        limit: usize,
        /// Also search exhaustively for a satisfying assignment.
        #[arg(long)]
        solve: bool,
        /// Variable ceiling for the exhaustive search.
        #[arg(long, default_value_t = cooklevin::DEFAULT_BRUTE_FORCE_LIMIT)]
        max_variables: usize,
    },
    /// Evaluate the formula on the witness tableau and on randomized assignments.
    Check {
        #[command(flatten)]
        instance: Instance,
        /// Number of randomized trials.
        #[arg(long, default_value_t = 10)]
        trials: usize,
        /// Seed for the randomized trials.
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tableau { instance } => run_tableau(instance)?,
        Commands::Formula {
            instance,
            limit,
            solve,
            max_variables,
        } => run_formula(instance, limit, solve, max_variables)?,
        Commands::Check {
            instance,
            trials,
            seed,
        } => run_check(instance, trials, seed)?,
    }

    Ok(())
}

fn load(instance: &Instance) -> Result<(TuringMachine, ReductionConfig, Vec<Symbol>)> {
    let machine = read_machine(&instance.machine)?;
    let config = ReductionConfig::for_time_bound(instance.time_bound)
        .with_search_limit(instance.search_limit);
    Ok((machine, config, word(&instance.input)))
}

fn read_machine(path: &Path) -> Result<TuringMachine> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read machine from {}", path.display()))?;
    contents
        .parse::<TuringMachine>()
        .with_context(|| format!("invalid machine description {}", path.display()))
}

fn run_tableau(instance: Instance) -> Result<()> {
    let (machine, config, input) = load(&instance)?;
    let reducer = Reducer::new(machine, config);
    match reducer.witness(&input).context("failed to lay out tableau")? {
        Some(tableau) => print!("{}", tableau),
        None => println!(
            "No accepting run within {} steps.",
            reducer.config().time_bound
        ),
    }
    Ok(())
}

fn run_formula(instance: Instance, limit: usize, solve: bool, max_variables: usize) -> Result<()> {
    let (machine, config, input) = load(&instance)?;
    let reducer = Reducer::new(
        machine,
        config
            .with_display_limit(limit)
            .with_brute_force_limit(max_variables),
    );

    let reduction = reducer.reduce(&input).context("reduction failed")?;
    let phi = reduction.formula();
    let (rows, cols) = reducer.config().dimensions();

    println!("time bound\t{}", reduction.time_bound());
    println!("tableau\t{}x{}", rows, cols);
    println!("symbols\t{}", reduction.alphabet().len());
    println!("windows\t{}", reduction.windows().len());
    println!("variables\t{}", reduction.num_variables());
    println!("size\t{}", phi.size());
    println!("{}", phi.pretty(reducer.config().display_limit));

    if solve {
        match reducer.solve(&input).context("exhaustive search failed")? {
            Some(assignment) => {
                let mut holding: Vec<_> = assignment
                    .into_iter()
                    .filter_map(|(v, b)| b.then_some(v))
                    .collect();
                holding.sort();
                println!("satisfiable");
                for v in holding {
                    println!("  {}", v);
                }
            }
            None => println!("unsatisfiable"),
        }
    }

    Ok(())
}

fn run_check(instance: Instance, trials: usize, seed: u64) -> Result<()> {
    let (machine, config, input) = load(&instance)?;
    let reducer = Reducer::new(machine, config);
    let report = reducer
        .check(&input, trials, seed)
        .context("formula check failed")?;

    println!("variables\t{}", report.variables);
    println!("size\t{}", report.formula_size);
    match (report.witness_steps, report.witness_satisfies) {
        (Some(steps), Some(satisfies)) => {
            println!("witness\t{} steps", steps);
            println!("witness satisfies\t{}", satisfies);
            for (idx, result) in report.random_trials.iter().enumerate() {
                println!("trial {}\t{}", idx + 1, result);
            }
        }
        _ => println!("witness\tnone"),
    }

    Ok(())
}
