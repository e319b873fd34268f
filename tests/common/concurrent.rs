use cyclic_reduce::Rendezvous;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Run `op` on `num_threads` threads sharing one barrier and collect the
/// per-thread results in thread-id order.
pub fn run_concurrent_with_barrier<B, F, R>(barrier: Arc<B>, num_threads: usize, op: F) -> Vec<R>
where
    B: Rendezvous + 'static,
    F: Fn(usize, Arc<B>) -> R + Send + Clone + 'static,
    R: Send + 'static,
{
    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let barrier = Arc::clone(&barrier);
            let op = op.clone();
            thread::spawn(move || op(thread_id, barrier))
        })
        .collect();

    wait_for_threads(handles)
}

fn wait_for_threads<R>(handles: Vec<JoinHandle<R>>) -> Vec<R> {
    handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect()
}
