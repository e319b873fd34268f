use cyclic_reduce::{
    input, reduce, sequential_sum, Error, FallbackReason, ParallelReducer, ReduceConfig,
    ReductionBuffer, ReductionMode, ReusableBarrier,
};
use std::ops::Add;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

mod common;
use common::{ones, random_values, FAST_TEST_LEN, MEDIUM_TEST_LEN};

#[test]
fn test_sixteen_ones_generation_by_generation() {
    let threads = 4;
    let buffer = Arc::new(ReductionBuffer::new(ones(16)));
    let barrier = Arc::new(ReusableBarrier::new(threads).unwrap());
    let observe = Arc::new(ReusableBarrier::new(threads).unwrap());
    let snapshots = Arc::new(Mutex::new(Vec::new()));

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let buffer = Arc::clone(&buffer);
            let barrier = Arc::clone(&barrier);
            let observe = Arc::clone(&observe);
            let snapshots = Arc::clone(&snapshots);
            thread::spawn(move || loop {
                let len = buffer.len();
                if len <= threads {
                    break;
                }
                let half = len / 2;
                for _ in 0..len / (2 * threads) {
                    if let Some(low) = buffer.claim_next_index() {
                        buffer.combine_and_store(low, low + half);
                    }
                }

                let released = barrier.wait();
                buffer.shrink_if_needed(barrier.generation_count());

                // Hold everyone until the leader has looked at the shrunk state
                observe.wait();
                if released.is_leader() {
                    snapshots.lock().unwrap().push(buffer.remainder());
                }
                observe.wait();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let snapshots = snapshots.lock().unwrap();
    assert_eq!(*snapshots, vec![vec![2; 8], vec![4; 4]]);
    assert_eq!(sequential_sum(&buffer.remainder()), 16);
}

#[test]
fn test_parallel_matches_sequential_across_pool_sizes() {
    for threads in [1, 2, 4, 8, 16] {
        let mut len = threads * 2;
        while len <= FAST_TEST_LEN * 4 {
            let values = random_values(len, len as u64);
            let expected = sequential_sum(&values);

            let outcome = reduce(values, &ReduceConfig::with_threads(threads)).unwrap();
            assert!(outcome.is_parallel());
            assert_eq!(outcome.sum, expected, "len={} threads={}", len, threads);
            assert_eq!(outcome.remainder_len, threads);

            len *= 2;
        }
    }
}

#[test]
fn test_every_front_index_combined_once() {
    let len = FAST_TEST_LEN;
    let threads = 8;
    let outcome = reduce(ones(len), &ReduceConfig::with_threads(threads)).unwrap();

    // len/2 + len/4 + ... down to a remainder of `threads`
    let combines: usize = outcome.workers.iter().map(|w| w.combines).sum();
    assert_eq!(combines, len - threads);
    assert_eq!(outcome.generations, (len / threads).trailing_zeros() as u64);
    for worker in &outcome.workers {
        assert_eq!(worker.generations, outcome.generations);
    }
}

#[test]
fn test_medium_input_both_barriers() {
    let values = random_values(MEDIUM_TEST_LEN, 134);
    let expected = sequential_sum(&values);

    let condvar = reduce(values.clone(), &ReduceConfig::with_threads(8)).unwrap();
    let spin = reduce(values, &ReduceConfig::spin(4)).unwrap();

    assert_eq!(condvar.sum, expected);
    assert_eq!(spin.sum, expected);
}

#[test]
fn test_length_equal_to_threads_runs_no_parallel_phase() {
    let values: Vec<i64> = (1..=8).collect();
    let outcome = reduce(values, &ReduceConfig::with_threads(8)).unwrap();

    assert_eq!(outcome.sum, 36);
    assert_eq!(outcome.generations, 0);
    assert!(matches!(
        outcome.mode,
        ReductionMode::Sequential {
            reason: FallbackReason::TooSmall { len: 8, threads: 8 }
        }
    ));
}

#[test]
fn test_not_power_of_two_still_sums() {
    let values = random_values(1000, 9);
    let expected = sequential_sum(&values);
    let outcome = reduce(values, &ReduceConfig::default()).unwrap();

    assert_eq!(outcome.sum, expected);
    assert_eq!(
        outcome.mode,
        ReductionMode::Sequential {
            reason: FallbackReason::NotPowerOfTwo { len: 1000 }
        }
    );
}

#[test]
fn test_float_values() {
    let values: Vec<f64> = (0..64).map(|i| i as f64 * 0.5).collect();
    let outcome = reduce(values, &ReduceConfig::with_threads(4)).unwrap();
    assert_eq!(outcome.sum, 1008.0);
}

#[test]
fn test_manual_pool_with_reducers() {
    let threads = 2;
    let buffer = Arc::new(ReductionBuffer::new((0..32i64).collect::<Vec<_>>()));
    let barrier = Arc::new(ReusableBarrier::new(threads).unwrap());

    let handles: Vec<_> = (0..threads)
        .map(|id| {
            let reducer =
                ParallelReducer::new(id, threads, Arc::clone(&buffer), Arc::clone(&barrier));
            thread::spawn(move || reducer.run())
        })
        .collect();
    let reports: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(reports.iter().map(|r| r.combines).sum::<usize>(), 30);
    assert_eq!(buffer.len(), 2);
    assert_eq!(sequential_sum(&buffer.remainder()), 31 * 32 / 2);
}

#[test]
fn test_overflowing_input_rejected_before_reducing() {
    let mut values = vec![0i64; 16];
    values[0] = i64::MAX;
    values[8] = 1;

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = input::checked_sum(&values)
            .and_then(|_| reduce(values, &ReduceConfig::with_threads(2)).map(|o| o.sum));
        let _ = tx.send(result);
    });

    match rx.recv_timeout(Duration::from_secs(5)) {
        Ok(Err(Error::Overflow { position })) => assert_eq!(position, 8),
        Ok(other) => panic!("expected overflow error, got {:?}", other),
        Err(_) => panic!("sum did not finish within 5s"),
    }
}

#[test]
fn test_large_mixed_sign_input_sums_in_parallel() {
    let mut values = vec![0i64; 16];
    values[0] = i64::MAX;
    values[8] = -1;
    values[15] = i64::MIN + 1;

    let reference = input::checked_sum(&values).unwrap();
    let outcome = reduce(values, &ReduceConfig::with_threads(2)).unwrap();

    assert_eq!(reference, -1);
    assert_eq!(outcome.sum, reference);
    assert!(outcome.is_parallel());
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Brittle(i64);

impl Add for Brittle {
    type Output = Brittle;

    fn add(self, _other: Brittle) -> Brittle {
        panic!("brittle values cannot be added");
    }
}

#[test]
fn test_panicking_add_reported_for_single_worker() {
    let result = reduce(vec![Brittle(1); 4], &ReduceConfig::with_threads(1));

    match result {
        Err(Error::WorkerPanicked { worker }) => assert_eq!(worker, 0),
        Err(other) => panic!("expected worker panic, got {}", other),
        Ok(outcome) => panic!("expected worker panic, got sum {:?}", outcome.sum),
    }
}
