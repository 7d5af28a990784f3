//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::{Args, LogLevel};
use config::Config;
use error::{CliError, InputError};
use executor::{Executor, WorkItem};
use output::OutputFormatter;
use tracing::{debug, info};

fn main() {
    let args = Args::parse();
    setup_tracing(args.log_level);
    debug!("Parsed CLI arguments: {args:?}");

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so answers on stdout stay clean
fn setup_tracing(log_level: LogLevel) {
    if let Some(level) = log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    if !config.input_dir.is_dir() {
        return Err(InputError::MissingDirectory(config.input_dir.clone()).into());
    }

    let registry = build_registry(&config.tags)?;
    info!(solvers = registry.storage().len(), tags = ?config.tags, "registry built");

    let executor = Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let missing_inputs = check_missing_inputs(&work_items, &executor);
    if !missing_inputs.is_empty() {
        println!("Missing {} input file(s):", missing_inputs.len());
        for (year, day) in &missing_inputs {
            println!(
                "  - {}/day{:02} ({})",
                year,
                day,
                executor.inputs().input_path(*year, *day).display()
            );
        }
    }

    run_executor(executor, work_items, config.quiet)
}

/// Work items whose input file is absent
fn check_missing_inputs(work_items: &[WorkItem], executor: &Executor) -> Vec<(u16, u8)> {
    work_items
        .iter()
        .filter(|w| !executor.inputs().contains(w.year, w.day))
        .map(|w| (w.year, w.day))
        .collect()
}

/// Run the executor, print results in order, and fail if any part failed
fn run_executor(
    executor: Executor,
    work_items: Vec<WorkItem>,
    quiet: bool,
) -> Result<(), CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys = work_items.iter().flat_map(|w| {
        w.parts.clone().map(move |p| aggregator::ResultKey {
            year: w.year,
            day: w.day,
            part: p,
        })
    });
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let mut formatter = OutputFormatter::new(std::io::stdout().lock(), quiet);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready)?;
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready)?;
        results.push(ready);
    }

    if !aggregator.is_complete() {
        let missing: Vec<String> = aggregator
            .missing()
            .map(|k| format!("{}/{:02} part {}", k.year, k.day, k.part))
            .collect();
        tracing::warn!("no result received for {}", missing.join(", "));
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?
        .map_err(CliError::Executor)?;

    formatter.print_summary(&results)?;
    drop(formatter);

    match results.into_iter().find_map(|r| r.answer.err()) {
        Some(first_failure) => Err(first_failure.into()),
        None => Ok(()),
    }
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
