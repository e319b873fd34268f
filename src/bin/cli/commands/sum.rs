//! Parallel summation command

use clap::{Arg, ArgMatches, Command};
use cyclic_reduce::{input, reduce, BarrierKind, ReductionMode, ReductionOutcome, Settings};
use serde::Serialize;

use crate::cli::utils::{
    format_duration, parse_arg, print_error, print_info, print_success, validate_length,
    validate_threads, CliResult,
};
use crate::cli::GlobalOptions;

/// Build the 'sum' subcommand
pub fn sum_command() -> Command {
    Command::new("sum")
        .about("Sum a sequence with the barrier-synchronized worker pool")
        .arg(
            Arg::new("input")
                .help("Read integers (whitespace or comma separated) from this file")
                .short('i')
                .long("input"),
        )
        .arg(
            Arg::new("length")
                .help("Length of the generated sequence")
                .short('n')
                .long("length"),
        )
        .arg(
            Arg::new("seed")
                .help("Seed for the generated sequence")
                .long("seed"),
        )
        .arg(
            Arg::new("max-value")
                .help("Generated values fall in 0..max-value")
                .long("max-value"),
        )
        .arg(
            Arg::new("threads")
                .help("Worker threads (power of two)")
                .short('t')
                .long("threads"),
        )
        .arg(
            Arg::new("barrier")
                .help("Barrier implementation")
                .long("barrier")
                .value_parser(["condvar", "spin"]),
        )
}

#[derive(Debug, Serialize)]
struct SumReport {
    input_len: usize,
    threads: usize,
    reference_sum: i64,
    computed_sum: i64,
    matches: bool,
    #[serde(flatten)]
    mode: ReductionMode,
    generations: u64,
    remainder_len: usize,
    elapsed_us: u64,
    workers: Vec<cyclic_reduce::WorkerReport>,
}

impl SumReport {
    fn new(reference_sum: i64, outcome: ReductionOutcome<i64>) -> Self {
        Self {
            input_len: outcome.input_len,
            threads: outcome.threads,
            reference_sum,
            computed_sum: outcome.sum,
            matches: reference_sum == outcome.sum,
            mode: outcome.mode,
            generations: outcome.generations,
            remainder_len: outcome.remainder_len,
            elapsed_us: outcome.elapsed.as_micros() as u64,
            workers: outcome.workers,
        }
    }
}

/// Execute the 'sum' command
pub fn run_sum(matches: &ArgMatches, settings: &Settings) -> CliResult<()> {
    let global = GlobalOptions::from_matches(matches);

    let mut reduce_config = settings.reduce.clone();
    if let Some(threads) = parse_arg::<usize>(matches, "threads")? {
        reduce_config.threads = threads;
    }
    if let Some(barrier) = parse_arg::<BarrierKind>(matches, "barrier")? {
        reduce_config.barrier = barrier;
    }
    validate_threads(reduce_config.threads)?;

    let values = match matches.get_one::<String>("input") {
        Some(path) => input::read_values(path)?,
        None => {
            let mut input_config = settings.input.clone();
            if let Some(length) = parse_arg::<usize>(matches, "length")? {
                input_config.length = length;
            }
            if let Some(seed) = parse_arg::<u64>(matches, "seed")? {
                input_config.seed = seed;
            }
            if let Some(max_value) = parse_arg::<i64>(matches, "max-value")? {
                input_config.max_value = max_value;
            }
            validate_length(input_config.length)?;
            input::generate(&input_config)?
        }
    };

    if !global.is_json() && !global.quiet {
        print_info(&format!(
            "Summing {} values on {} threads ({:?} barrier)",
            values.len(),
            reduce_config.threads,
            reduce_config.barrier
        ));
    }

    let reference_sum = input::checked_sum(&values)?;
    let outcome = reduce(values, &reduce_config)?;
    let elapsed = outcome.elapsed;
    let report = SumReport::new(reference_sum, outcome);

    if global.is_json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Reference sum (sequential): {}", report.reference_sum);
    match report.mode {
        ReductionMode::Parallel => println!(
            "Divide-and-conquer sum ({} threads, {} generations): {}",
            report.threads, report.generations, report.computed_sum
        ),
        ReductionMode::Sequential { reason } => println!(
            "Divide-and-conquer reduction not applicable ({}), sequential sum: {}",
            reason, report.computed_sum
        ),
    }

    if !global.quiet {
        print_info(&format!("Elapsed: {}", format_duration(elapsed)));
    }

    if report.matches {
        print_success("sums match");
    } else {
        print_error(&format!(
            "sums differ: reference {} vs computed {}",
            report.reference_sum, report.computed_sum
        ));
    }

    Ok(())
}
