//! CLI structure, global options and dispatch.
//!
//! # Output Formats
//!
//! - `text` (default): human-readable lines
//! - `json`: one pretty-printed JSON document per run

pub mod commands;
pub mod utils;

use clap::{Arg, ArgMatches, Command};
use cyclic_reduce::{logging, Settings};
use utils::CliResult;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Global CLI options that apply to all commands
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
}

impl GlobalOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let output_format = match matches.get_one::<String>("format").map(String::as_str) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };

        GlobalOptions {
            output_format,
            quiet: matches.get_flag("quiet"),
        }
    }

    pub fn is_json(&self) -> bool {
        self.output_format == OutputFormat::Json
    }
}

pub fn build_cli() -> Command {
    Command::new("reduce-cli")
        .about("Barrier-synchronized divide-and-conquer summation")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("format")
                .help("Output format: text (default) or json")
                .short('o')
                .long("format")
                .global(true)
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("quiet")
                .help("Suppress informational output (results still shown)")
                .short('q')
                .long("quiet")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .help("JSON settings file; command-line flags override it")
                .short('c')
                .long("config")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .help("Log level: error, warn, info, debug or trace")
                .long("log-level")
                .global(true)
                .default_value("warn"),
        )
        .arg(
            Arg::new("log-json")
                .help("Emit logs as JSON")
                .long("log-json")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommand(commands::sum::sum_command())
        .subcommand(commands::library::library_command())
}

pub fn run(matches: ArgMatches) -> CliResult<()> {
    let level = matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn");
    logging::init_logging(logging::parse_level(level)?, matches.get_flag("log-json"))?;

    let settings = match matches.get_one::<String>("config") {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    match matches.subcommand() {
        Some(("sum", sub)) => commands::sum::run_sum(sub, &settings),
        Some(("library", sub)) => commands::library::run_library(sub, &settings),
        _ => Err("Unknown command. Use --help for available commands.".into()),
    }
}
