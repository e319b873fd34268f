//! CLI command modules
//!
//! - sum: parallel reduction with a sequential reference check
//! - library: counting-semaphore simulation

pub mod library;
pub mod sum;
