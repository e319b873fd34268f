use super::{BarrierWaitResult, Rendezvous};
use crate::error::{Error, Result};
use parking_lot::{Condvar, Mutex};
use tracing::trace;

#[derive(Debug)]
struct BarrierState {
    arrived: usize,
    generation: u64,
}

/// Reusable barrier built on a mutex and a condition variable.
///
/// Waiters sleep until the generation counter moves past the value they
/// captured on arrival. A wakeup that happens before the release (spurious or
/// otherwise) sees the old generation and goes back to sleep, which is what
/// makes back-to-back cycles on the same instance safe.
#[derive(Debug)]
pub struct ReusableBarrier {
    state: Mutex<BarrierState>,
    released: Condvar,
    target: usize,
}

impl ReusableBarrier {
    pub fn new(participants: usize) -> Result<Self> {
        if participants == 0 {
            return Err(Error::InvalidParticipantCount {
                count: participants,
            });
        }

        Ok(Self {
            state: Mutex::new(BarrierState {
                arrived: 0,
                generation: 0,
            }),
            released: Condvar::new(),
            target: participants,
        })
    }

    pub fn wait(&self) -> BarrierWaitResult {
        let mut state = self.state.lock();
        let current_generation = state.generation;
        state.arrived += 1;

        if state.arrived != self.target {
            while state.generation == current_generation {
                self.released.wait(&mut state);
            }
            return BarrierWaitResult::follower(current_generation + 1);
        }

        state.generation += 1;
        state.arrived = 0;
        self.released.notify_all();
        trace!(generation = state.generation, "barrier released");

        BarrierWaitResult::leader(state.generation)
    }

    pub fn generation_count(&self) -> u64 {
        self.state.lock().generation
    }

    /// Participants that have arrived in the generation still in progress.
    pub fn arrived(&self) -> usize {
        self.state.lock().arrived
    }

    pub fn participants(&self) -> usize {
        self.target
    }
}

impl Rendezvous for ReusableBarrier {
    fn wait(&self) -> BarrierWaitResult {
        ReusableBarrier::wait(self)
    }

    fn generation_count(&self) -> u64 {
        ReusableBarrier::generation_count(self)
    }

    fn participants(&self) -> usize {
        self.target
    }
}
