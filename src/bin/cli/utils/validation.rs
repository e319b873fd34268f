//! Input validation utilities for CLI commands

use clap::ArgMatches;
use std::fmt::Display;
use std::str::FromStr;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Validation limits for CLI operations
pub mod limits {
    /// Maximum worker threads
    pub const MAX_THREADS: usize = 1024;
    /// Maximum generated sequence length (2^28 values)
    pub const MAX_LENGTH: usize = 1 << 28;
}

/// Parse an optional argument, naming it in the error message
pub fn parse_arg<T>(matches: &ArgMatches, name: &str) -> CliResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match matches.get_one::<String>(name) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("invalid value '{}' for --{}: {}", raw, name, e).into()),
        None => Ok(None),
    }
}

pub fn validate_threads(threads: usize) -> CliResult<()> {
    if threads > limits::MAX_THREADS {
        return Err(format!("threads cannot exceed {}", limits::MAX_THREADS).into());
    }
    Ok(())
}

pub fn validate_length(length: usize) -> CliResult<()> {
    if length > limits::MAX_LENGTH {
        return Err(format!("length cannot exceed {}", limits::MAX_LENGTH).into());
    }
    Ok(())
}
