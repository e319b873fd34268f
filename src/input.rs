//! Input sequences: seeded generation and parsing from text.

use crate::config::InputConfig;
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;

/// Deterministic pseudo-random sequence for `config`.
pub fn generate(config: &InputConfig) -> Result<Vec<i64>> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    Ok((0..config.length)
        .map(|_| rng.random_range(0..config.max_value))
        .collect())
}

/// Parse integers separated by whitespace and/or commas.
pub fn parse_values(text: &str) -> Result<Vec<i64>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token.parse::<i64>().map_err(|e| Error::Parse {
                position,
                message: format!("'{}': {}", token, e),
            })
        })
        .collect()
}

/// Total of `values`, rejecting inputs where some grouping could overflow.
///
/// Positives and negatives are totalled apart. Every partial sum the pool
/// can form lies between those two totals, so if both fit, any order of
/// pairwise additions fits too.
pub fn checked_sum(values: &[i64]) -> Result<i64> {
    let mut positive: i64 = 0;
    let mut negative: i64 = 0;

    for (position, &value) in values.iter().enumerate() {
        let side = if value >= 0 {
            &mut positive
        } else {
            &mut negative
        };
        *side = side
            .checked_add(value)
            .ok_or(Error::Overflow { position })?;
    }

    Ok(positive + negative)
}

pub fn read_values<P: AsRef<Path>>(path: P) -> Result<Vec<i64>> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_values(&contents)
}
