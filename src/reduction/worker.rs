use super::{Element, ReductionBuffer};
use crate::sync::Rendezvous;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// What one worker did over the whole reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub combines: usize,
    pub generations: u64,
}

/// Per-worker control loop.
///
/// `COMBINING -> BARRIER_WAIT -> SHRINK_CHECK -> (COMBINING | DONE)`
///
/// Every worker of a pool must share the same buffer and barrier, and the
/// barrier must have exactly `threads` participants.
pub struct ParallelReducer<T, B> {
    worker_id: usize,
    threads: usize,
    buffer: Arc<ReductionBuffer<T>>,
    barrier: Arc<B>,
}

impl<T, B> ParallelReducer<T, B>
where
    T: Element,
    B: Rendezvous,
{
    pub fn new(
        worker_id: usize,
        threads: usize,
        buffer: Arc<ReductionBuffer<T>>,
        barrier: Arc<B>,
    ) -> Self {
        Self {
            worker_id,
            threads,
            buffer,
            barrier,
        }
    }

    pub fn run(self) -> WorkerReport {
        let mut report = WorkerReport {
            worker_id: self.worker_id,
            combines: 0,
            generations: 0,
        };

        // The barrier cannot advance before this worker's first wait, so the
        // offset is the same for every worker even on a reused barrier.
        let base_generation = self.barrier.generation_count();

        loop {
            let len = self.buffer.len();
            if len <= self.threads {
                break;
            }

            let half = len / 2;
            for _ in 0..len / (2 * self.threads) {
                match self.buffer.claim_next_index() {
                    Some(low) => {
                        self.buffer.combine_and_store(low, low + half);
                        report.combines += 1;
                    }
                    None => break,
                }
            }

            self.barrier.wait();

            let generation = self.barrier.generation_count() - base_generation;
            self.buffer.shrink_if_needed(generation);
            report.generations += 1;
        }

        debug!(
            worker = report.worker_id,
            combines = report.combines,
            generations = report.generations,
            "worker finished"
        );
        report
    }
}
