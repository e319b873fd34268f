use super::{is_power_of_two, sequential_sum, Element, ParallelReducer, ReductionBuffer, WorkerReport};
use crate::config::{BarrierKind, ReduceConfig};
use crate::error::{Error, Result};
use crate::sync::{Rendezvous, ReusableBarrier, SpinBarrier};
use parking_lot::{Condvar, Mutex};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Why the parallel path was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    NotPowerOfTwo { len: usize },
    TooSmall { len: usize, threads: usize },
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NotPowerOfTwo { len } => {
                write!(f, "length {} is not a power of two", len)
            }
            FallbackReason::TooSmall { len, threads } => write!(
                f,
                "length {} is too small to split across {} threads",
                len, threads
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReductionMode {
    Parallel,
    Sequential { reason: FallbackReason },
}

#[derive(Debug, Clone, Serialize)]
pub struct ReductionOutcome<T> {
    pub sum: T,
    pub mode: ReductionMode,
    pub input_len: usize,
    pub threads: usize,
    /// Barrier generations completed by the pool.
    pub generations: u64,
    /// Elements left for the final sequential pass.
    pub remainder_len: usize,
    pub workers: Vec<WorkerReport>,
    pub elapsed: Duration,
}

impl<T> ReductionOutcome<T> {
    pub fn is_parallel(&self) -> bool {
        self.mode == ReductionMode::Parallel
    }
}

/// Sum `values` with a pool of `config.threads` workers.
///
/// The thread count is checked before anything is spawned. Inputs the
/// parallel path cannot handle (length not a power of two, or no longer
/// than the pool) are summed sequentially instead, and the outcome records
/// why.
///
/// There is no timeout: a worker that never reaches the barrier stalls the
/// whole pool. That includes a worker whose `T::add` panics, so `add` must
/// not panic on any grouping of `values` (see [`crate::input::checked_sum`]
/// for `i64`). With a single worker the panic is reported as
/// [`Error::WorkerPanicked`].
pub fn reduce<T: Element>(values: Vec<T>, config: &ReduceConfig) -> Result<ReductionOutcome<T>> {
    config.validate()?;

    let start = Instant::now();
    let input_len = values.len();
    let threads = config.threads;

    let fallback = if !is_power_of_two(input_len) {
        Some(FallbackReason::NotPowerOfTwo { len: input_len })
    } else if input_len <= threads {
        Some(FallbackReason::TooSmall {
            len: input_len,
            threads,
        })
    } else {
        None
    };

    if let Some(reason) = fallback {
        info!(len = input_len, threads, %reason, "summing sequentially");
        return Ok(ReductionOutcome {
            sum: sequential_sum(&values),
            mode: ReductionMode::Sequential { reason },
            input_len,
            threads,
            generations: 0,
            remainder_len: input_len,
            workers: Vec::new(),
            elapsed: start.elapsed(),
        });
    }

    info!(
        len = input_len,
        threads,
        barrier = ?config.barrier,
        "starting parallel reduction"
    );

    let buffer = Arc::new(ReductionBuffer::new(values));
    let (workers, generations) = match config.barrier {
        BarrierKind::Condvar => {
            run_pool(&buffer, Arc::new(ReusableBarrier::new(threads)?), config)?
        }
        BarrierKind::Spin => run_pool(&buffer, Arc::new(SpinBarrier::new(threads)?), config)?,
    };

    let remainder = buffer.remainder();
    let sum = sequential_sum(&remainder);
    let elapsed = start.elapsed();

    info!(
        generations,
        remainder = remainder.len(),
        elapsed_us = elapsed.as_micros() as u64,
        "parallel reduction complete"
    );

    Ok(ReductionOutcome {
        sum,
        mode: ReductionMode::Parallel,
        input_len,
        threads,
        generations,
        remainder_len: remainder.len(),
        workers,
        elapsed,
    })
}

/// Spawn the whole pool, then let it start.
///
/// Workers are held at the gate until every thread exists. If a spawn
/// fails, the gate opens with "abort" so the threads already created return
/// without ever touching the barrier.
fn run_pool<T, B>(
    buffer: &Arc<ReductionBuffer<T>>,
    barrier: Arc<B>,
    config: &ReduceConfig,
) -> Result<(Vec<WorkerReport>, u64)>
where
    T: Element,
    B: Rendezvous + 'static,
{
    let gate = Arc::new(StartGate::new());
    let mut handles = Vec::with_capacity(config.threads);

    for worker_id in 0..config.threads {
        let reducer = ParallelReducer::new(
            worker_id,
            config.threads,
            Arc::clone(buffer),
            Arc::clone(&barrier),
        );
        let worker_gate = Arc::clone(&gate);
        let name = format!("{}-{}", config.thread_name_prefix, worker_id);

        let spawned = thread::Builder::new().name(name.clone()).spawn(move || {
            if worker_gate.wait_for_start() {
                Some(reducer.run())
            } else {
                None
            }
        });

        match spawned {
            Ok(handle) => handles.push(handle),
            Err(source) => {
                error!(worker = worker_id, "failed to spawn reduction worker: {}", source);
                gate.open(false);
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(Error::ThreadSpawn { name, source });
            }
        }
    }

    gate.open(true);

    let mut reports = Vec::with_capacity(handles.len());
    let mut panicked = None;
    for (worker_id, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(report) => reports.extend(report),
            Err(_) => {
                error!(worker = worker_id, "reduction worker panicked");
                panicked.get_or_insert(worker_id);
            }
        }
    }

    if let Some(worker) = panicked {
        return Err(Error::WorkerPanicked { worker });
    }

    Ok((reports, barrier.generation_count()))
}

/// One-shot latch: `None` until the driver decides, then go or abort.
struct StartGate {
    decision: Mutex<Option<bool>>,
    decided: Condvar,
}

impl StartGate {
    fn new() -> Self {
        Self {
            decision: Mutex::new(None),
            decided: Condvar::new(),
        }
    }

    fn wait_for_start(&self) -> bool {
        let mut decision = self.decision.lock();
        loop {
            if let Some(go) = *decision {
                return go;
            }
            self.decided.wait(&mut decision);
        }
    }

    fn open(&self, go: bool) {
        *self.decision.lock() = Some(go);
        self.decided.notify_all();
    }
}
