use super::{BarrierWaitResult, Rendezvous};
use crate::error::{Error, Result};
use crossbeam::utils::{Backoff, CachePadded};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tracing::trace;

/// Spin-wait barrier with the same generation protocol as
/// [`ReusableBarrier`](super::ReusableBarrier).
///
/// Waiters never park; they back off with `Backoff::snooze` until the
/// generation changes. Only worth it when every participant owns a core.
#[derive(Debug)]
pub struct SpinBarrier {
    arrived: CachePadded<AtomicUsize>,
    generation: CachePadded<AtomicU64>,
    target: usize,
}

impl SpinBarrier {
    pub fn new(participants: usize) -> Result<Self> {
        if participants == 0 {
            return Err(Error::InvalidParticipantCount {
                count: participants,
            });
        }

        Ok(Self {
            arrived: CachePadded::new(AtomicUsize::new(0)),
            generation: CachePadded::new(AtomicU64::new(0)),
            target: participants,
        })
    }

    pub fn wait(&self) -> BarrierWaitResult {
        let current_generation = self.generation.load(Ordering::Acquire);

        if self.arrived.fetch_add(1, Ordering::AcqRel) + 1 == self.target {
            // Reset before publishing the new generation so released
            // participants start the next cycle from zero.
            self.arrived.store(0, Ordering::Relaxed);
            self.generation
                .store(current_generation + 1, Ordering::Release);
            trace!(generation = current_generation + 1, "spin barrier released");
            return BarrierWaitResult::leader(current_generation + 1);
        }

        let backoff = Backoff::new();
        while self.generation.load(Ordering::Acquire) == current_generation {
            backoff.snooze();
        }
        BarrierWaitResult::follower(current_generation + 1)
    }

    pub fn generation_count(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn participants(&self) -> usize {
        self.target
    }
}

impl Rendezvous for SpinBarrier {
    fn wait(&self) -> BarrierWaitResult {
        SpinBarrier::wait(self)
    }

    fn generation_count(&self) -> u64 {
        SpinBarrier::generation_count(self)
    }

    fn participants(&self) -> usize {
        self.target
    }
}
