//! Barrier-synchronized divide-and-conquer summation.
//!
//! Each generation the live range `[0, len)` is folded in half: index `i`
//! absorbs `i + len/2`. Workers claim indices from a shared queue, meet at
//! the barrier, and one of them shrinks the buffer before the next round.
//! Once `len <= threads` the driver finishes the remainder sequentially.

pub mod buffer;
pub mod driver;
pub mod worker;

use std::ops::Add;

pub use buffer::ReductionBuffer;
pub use driver::{reduce, FallbackReason, ReductionMode, ReductionOutcome};
pub use worker::{ParallelReducer, WorkerReport};

/// Values the engine can sum.
///
/// `add` runs on worker threads and must not panic.
pub trait Element: Copy + Default + Send + Sync + Add<Output = Self> + 'static {}

impl<T> Element for T where T: Copy + Default + Send + Sync + Add<Output = T> + 'static {}

/// Plain left-to-right sum, used for the final remainder and as the reference.
pub fn sequential_sum<T: Element>(values: &[T]) -> T {
    values.iter().fold(T::default(), |acc, &value| acc + value)
}

pub fn is_power_of_two(n: usize) -> bool {
    n.is_power_of_two()
}
