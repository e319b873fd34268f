//! Library simulation: many visitors, a few copies of one book.
//!
//! Each visitor thread borrows a copy through a [`CountingSemaphore`], reads
//! for a random moment and gives it back.

use crate::config::LibraryConfig;
use crate::error::{Error, Result};
use crate::sync::CountingSemaphore;
use rand::Rng;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize)]
pub struct LibraryReport {
    pub copies: usize,
    pub visitors: usize,
    pub rounds: usize,
    pub borrows: usize,
    /// Most visitors ever reading at the same instant.
    pub peak_readers: usize,
    pub elapsed: Duration,
}

pub fn simulate(config: &LibraryConfig) -> Result<LibraryReport> {
    config.validate()?;

    let start = Instant::now();
    let semaphore = Arc::new(CountingSemaphore::new(config.copies)?);
    let readers = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let borrows = Arc::new(AtomicUsize::new(0));

    info!(
        copies = config.copies,
        visitors = config.visitors,
        rounds = config.rounds,
        "library simulation started"
    );

    for round in 0..config.rounds {
        let mut handles = Vec::with_capacity(config.visitors);

        for visitor in 0..config.visitors {
            let semaphore = Arc::clone(&semaphore);
            let readers = Arc::clone(&readers);
            let peak = Arc::clone(&peak);
            let borrows = Arc::clone(&borrows);
            let max_read_micros = config.max_read_micros;
            let name = format!("visitor-{}", visitor);

            let handle = thread::Builder::new()
                .name(name.clone())
                .spawn(move || {
                    let _copy = semaphore.acquire();
                    let now_reading = readers.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now_reading, Ordering::SeqCst);
                    borrows.fetch_add(1, Ordering::Relaxed);
                    debug!(visitor, available = semaphore.available(), "copy borrowed");

                    let read_for = rand::rng().random_range(0..=max_read_micros);
                    thread::sleep(Duration::from_micros(read_for));

                    readers.fetch_sub(1, Ordering::SeqCst);
                    debug!(visitor, "copy returned");
                })
                .map_err(|source| Error::ThreadSpawn { name, source })?;
            handles.push(handle);
        }

        for (visitor, handle) in handles.into_iter().enumerate() {
            handle
                .join()
                .map_err(|_| Error::WorkerPanicked { worker: visitor })?;
        }

        debug!(round, "library round finished");
    }

    let report = LibraryReport {
        copies: config.copies,
        visitors: config.visitors,
        rounds: config.rounds,
        borrows: borrows.load(Ordering::Relaxed),
        peak_readers: peak.load(Ordering::SeqCst),
        elapsed: start.elapsed(),
    };

    info!(
        borrows = report.borrows,
        peak_readers = report.peak_readers,
        "library simulation finished"
    );
    Ok(report)
}
