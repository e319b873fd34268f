//! Reusable thread barrier and a barrier-synchronized parallel reduction.
//!
//! ```
//! use cyclic_reduce::{reduce, ReduceConfig};
//!
//! let outcome = reduce(vec![1i64; 16], &ReduceConfig::with_threads(4)).unwrap();
//! assert_eq!(outcome.sum, 16);
//! assert_eq!(outcome.generations, 2);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod library;
pub mod logging;
pub mod reduction;
pub mod sync;

pub use config::{BarrierKind, InputConfig, LibraryConfig, ReduceConfig, Settings};
pub use error::{Error, Result};
pub use library::LibraryReport;
pub use reduction::{
    is_power_of_two, reduce, sequential_sum, Element, FallbackReason, ParallelReducer,
    ReductionBuffer, ReductionMode, ReductionOutcome, WorkerReport,
};
pub use sync::{
    BarrierWaitResult, CountingSemaphore, Rendezvous, ReusableBarrier, SemaphorePermit,
    SpinBarrier,
};
