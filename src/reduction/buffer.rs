use super::Element;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug)]
struct Layout {
    len: usize,
    applied_generation: u64,
}

/// Shared state of one reduction: the values and the per-generation work
/// queue.
///
/// The backing store never reallocates. Shrinking only moves the logical
/// length, under a lock of its own, so a reader can never observe a
/// container that is being resized. Each cell has its own lock; the queue
/// has another.
#[derive(Debug)]
pub struct ReductionBuffer<T> {
    cells: Box<[Mutex<T>]>,
    original_len: usize,
    template: Box<[usize]>,
    layout: Mutex<Layout>,
    pending: Mutex<VecDeque<usize>>,
}

impl<T: Element> ReductionBuffer<T> {
    pub fn new(values: Vec<T>) -> Self {
        let original_len = values.len();
        let template: Box<[usize]> = (0..original_len / 2).collect();
        let pending = template.iter().copied().collect();

        Self {
            cells: values.into_iter().map(Mutex::new).collect(),
            original_len,
            template,
            layout: Mutex::new(Layout {
                len: original_len,
                applied_generation: 0,
            }),
            pending: Mutex::new(pending),
        }
    }

    /// Current value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the original length.
    pub fn read(&self, index: usize) -> T {
        *self.cells[index].lock()
    }

    /// Store `read(dst) + read(src)` into `dst` as one step.
    ///
    /// Cell locks are always taken in ascending index order.
    pub fn combine_and_store(&self, dst: usize, src: usize) {
        if dst == src {
            let mut cell = self.cells[dst].lock();
            *cell = *cell + *cell;
            return;
        }

        let (low, high) = if dst < src { (dst, src) } else { (src, dst) };
        let low_guard = self.cells[low].lock();
        let high_guard = self.cells[high].lock();
        let (mut dst_guard, src_guard) = if dst < src {
            (low_guard, high_guard)
        } else {
            (high_guard, low_guard)
        };
        *dst_guard = *dst_guard + *src_guard;
    }

    /// Take the next unprocessed front-half index of this generation.
    pub fn claim_next_index(&self) -> Option<usize> {
        self.pending.lock().pop_front()
    }

    /// Apply the shrink for `generation` unless it has already been applied.
    ///
    /// Sets the logical length to `original_len / 2^generation` and refills
    /// the work queue with the new front half. Returns `true` for the one
    /// call that performed the transition.
    pub fn shrink_if_needed(&self, generation: u64) -> bool {
        let mut layout = self.layout.lock();
        if generation <= layout.applied_generation {
            return false;
        }

        let target_len = u32::try_from(generation)
            .ok()
            .and_then(|shift| self.original_len.checked_shr(shift))
            .unwrap_or(0);
        let half = target_len / 2;

        {
            let mut pending = self.pending.lock();
            pending.clear();
            pending.extend(self.template[..half].iter().copied());
        }

        debug!(
            generation,
            from = layout.len,
            to = target_len,
            "reduction buffer shrunk"
        );
        layout.len = target_len;
        layout.applied_generation = generation;
        true
    }

    /// Logical length of the live range.
    pub fn len(&self) -> usize {
        self.layout.lock().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn half_len(&self) -> usize {
        self.len() / 2
    }

    pub fn original_len(&self) -> usize {
        self.original_len
    }

    pub fn applied_generation(&self) -> u64 {
        self.layout.lock().applied_generation
    }

    /// Indices still waiting to be claimed this generation.
    pub fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Copy of the live range `[0, len)`.
    pub fn remainder(&self) -> Vec<T> {
        let len = self.len();
        self.cells[..len].iter().map(|cell| *cell.lock()).collect()
    }
}
