//! Runtime configuration.
//!
//! Every section has a `Default` and a `validate()`; a JSON file may
//! override any subset of fields through [`Settings::from_file`].

use crate::error::{Error, Result};
use crate::reduction::is_power_of_two;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Which barrier implementation the worker pool synchronizes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierKind {
    /// Mutex + condition variable; waiters park.
    #[default]
    Condvar,
    /// Atomics + backoff; waiters spin.
    Spin,
}

impl FromStr for BarrierKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "condvar" => Ok(BarrierKind::Condvar),
            "spin" => Ok(BarrierKind::Spin),
            _ => Err(Error::Config(format!(
                "Invalid barrier kind: {}. Use 'condvar' or 'spin'.",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReduceConfig {
    /// Worker pool size. Must be a power of two.
    pub threads: usize,
    pub barrier: BarrierKind,
    pub thread_name_prefix: String,
}

impl Default for ReduceConfig {
    fn default() -> Self {
        Self {
            threads: 8,
            barrier: BarrierKind::Condvar,
            thread_name_prefix: "reduce-worker".to_string(),
        }
    }
}

impl ReduceConfig {
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads,
            ..Default::default()
        }
    }

    /// Spin barrier preset, for pools no larger than the core count.
    pub fn spin(threads: usize) -> Self {
        Self {
            threads,
            barrier: BarrierKind::Spin,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !is_power_of_two(self.threads) {
            return Err(Error::InvalidThreadCount {
                threads: self.threads,
            });
        }
        if self.thread_name_prefix.is_empty() {
            return Err(Error::Config(
                "thread_name_prefix cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// How the CLI generates its input sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub length: usize,
    pub seed: u64,
    /// Values are drawn from `0..max_value`.
    pub max_value: i64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            length: 1 << 20,
            seed: 134,
            max_value: 100,
        }
    }
}

impl InputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_value <= 0 {
            return Err(Error::Config(format!(
                "max_value must be positive, got {}",
                self.max_value
            )));
        }
        Ok(())
    }
}

/// Counting-semaphore simulation: visitors sharing a few copies of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub copies: usize,
    pub visitors: usize,
    pub rounds: usize,
    /// Upper bound of the random reading time per borrow.
    pub max_read_micros: u64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            copies: 5,
            visitors: 50,
            rounds: 1,
            max_read_micros: 5,
        }
    }
}

impl LibraryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.copies == 0 {
            return Err(Error::InvalidPermitCount { count: 0 });
        }
        if self.visitors == 0 {
            return Err(Error::Config("visitors must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub reduce: ReduceConfig,
    pub input: InputConfig,
    pub library: LibraryConfig,
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.reduce.validate()?;
        self.input.validate()?;
        self.library.validate()
    }
}
