//! Shared helpers for CLI commands: validation and display.

pub mod display;
pub mod validation;

pub use display::*;
pub use validation::*;
