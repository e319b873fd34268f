//! Synchronization primitives used by the reduction engine.
//!
//! - `barrier`: condvar-backed reusable barrier (default)
//! - `spin`: spin-wait barrier with the same generation semantics
//! - `semaphore`: counting semaphore with RAII permits

pub mod barrier;
pub mod semaphore;
pub mod spin;

pub use barrier::ReusableBarrier;
pub use semaphore::{CountingSemaphore, SemaphorePermit};
pub use spin::SpinBarrier;

/// A cyclic rendezvous point for a fixed set of participants.
///
/// Implementations must release a generation only once every participant
/// has arrived, and must wake waiters on a generation change rather than on
/// the arrival count, so the same instance can be reused immediately.
pub trait Rendezvous: Send + Sync {
    /// Block until all participants of the current generation have arrived.
    fn wait(&self) -> BarrierWaitResult;

    /// Number of completed release cycles.
    fn generation_count(&self) -> u64;

    /// Number of participants per generation.
    fn participants(&self) -> usize;
}

/// Returned by [`Rendezvous::wait`] once the generation has been released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarrierWaitResult {
    is_leader: bool,
    generation: u64,
}

impl BarrierWaitResult {
    pub(crate) fn leader(generation: u64) -> Self {
        Self {
            is_leader: true,
            generation,
        }
    }

    pub(crate) fn follower(generation: u64) -> Self {
        Self {
            is_leader: false,
            generation,
        }
    }

    /// True for exactly one participant per generation: the last arriver.
    pub fn is_leader(&self) -> bool {
        self.is_leader
    }

    /// The generation count right after this release.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
