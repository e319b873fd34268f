use crate::error::{Error, Result};
use parking_lot::{Condvar, Mutex};

/// Counting semaphore handing out RAII permits.
#[derive(Debug)]
pub struct CountingSemaphore {
    permits: Mutex<usize>,
    available: Condvar,
    capacity: usize,
}

/// A held permit; returned to the semaphore on drop.
#[derive(Debug)]
pub struct SemaphorePermit<'a> {
    semaphore: &'a CountingSemaphore,
}

impl CountingSemaphore {
    pub fn new(permits: usize) -> Result<Self> {
        if permits == 0 {
            return Err(Error::InvalidPermitCount { count: permits });
        }

        Ok(Self {
            permits: Mutex::new(permits),
            available: Condvar::new(),
            capacity: permits,
        })
    }

    /// Block until a permit is free, then take it.
    pub fn acquire(&self) -> SemaphorePermit<'_> {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.available.wait(&mut permits);
        }
        *permits -= 1;
        SemaphorePermit { semaphore: self }
    }

    pub fn try_acquire(&self) -> Option<SemaphorePermit<'_>> {
        let mut permits = self.permits.lock();
        if *permits == 0 {
            return None;
        }
        *permits -= 1;
        Some(SemaphorePermit { semaphore: self })
    }

    pub fn available(&self) -> usize {
        *self.permits.lock()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn release(&self) {
        let mut permits = self.permits.lock();
        *permits += 1;
        debug_assert!(*permits <= self.capacity);
        self.available.notify_one();
    }
}

impl Drop for SemaphorePermit<'_> {
    fn drop(&mut self) {
        self.semaphore.release();
    }
}
