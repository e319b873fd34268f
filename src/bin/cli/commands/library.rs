//! Library simulation command

use clap::{Arg, ArgMatches, Command};
use cyclic_reduce::{library, Settings};

use crate::cli::utils::{format_duration, parse_arg, print_header, CliResult};
use crate::cli::GlobalOptions;

/// Build the 'library' subcommand
pub fn library_command() -> Command {
    Command::new("library")
        .about("Simulate visitors sharing a few copies of a book (counting semaphore)")
        .arg(
            Arg::new("copies")
                .help("Copies available in the library")
                .long("copies"),
        )
        .arg(
            Arg::new("visitors")
                .help("Visitor threads per round")
                .long("visitors"),
        )
        .arg(
            Arg::new("rounds")
                .help("Number of simulation rounds")
                .long("rounds"),
        )
        .arg(
            Arg::new("max-read-micros")
                .help("Upper bound of the random reading time")
                .long("max-read-micros"),
        )
}

/// Execute the 'library' command
pub fn run_library(matches: &ArgMatches, settings: &Settings) -> CliResult<()> {
    let global = GlobalOptions::from_matches(matches);

    let mut config = settings.library.clone();
    if let Some(copies) = parse_arg::<usize>(matches, "copies")? {
        config.copies = copies;
    }
    if let Some(visitors) = parse_arg::<usize>(matches, "visitors")? {
        config.visitors = visitors;
    }
    if let Some(rounds) = parse_arg::<usize>(matches, "rounds")? {
        config.rounds = rounds;
    }
    if let Some(micros) = parse_arg::<u64>(matches, "max-read-micros")? {
        config.max_read_micros = micros;
    }

    let report = library::simulate(&config)?;

    if global.is_json() {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !global.quiet {
        print_header("Library Simulation");
    }
    println!("Copies:       {}", report.copies);
    println!("Visitors:     {} per round, {} rounds", report.visitors, report.rounds);
    println!("Borrows:      {}", report.borrows);
    println!("Peak readers: {}", report.peak_readers);
    println!("Elapsed:      {}", format_duration(report.elapsed));

    Ok(())
}
