use cyclic_reduce::{
    is_power_of_two, reduce, sequential_sum, BarrierKind, ReduceConfig, ReductionBuffer,
    ReusableBarrier,
};
use proptest::collection::vec as prop_vec;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn power_of_two_values(max_exp: u32) -> impl Strategy<Value = Vec<i64>> {
    (0..=max_exp).prop_flat_map(|exp| prop_vec(-1_000_000i64..1_000_000, 1usize << exp))
}

// Property: the pool computes the same sum as a plain fold
proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_parallel_sum_matches_sequential(
        values in power_of_two_values(12),
        thread_exp in 0u32..4,
        spin in any::<bool>()
    ) {
        let config = ReduceConfig {
            threads: 1 << thread_exp,
            barrier: if spin { BarrierKind::Spin } else { BarrierKind::Condvar },
            ..Default::default()
        };
        let expected = sequential_sum(&values);
        let len = values.len();

        let outcome = reduce(values, &config).unwrap();
        prop_assert_eq!(outcome.sum, expected);
        prop_assert_eq!(outcome.is_parallel(), len > config.threads);
    }
}

// Property: any length still sums correctly, parallel or not
proptest! {
    #[test]
    fn prop_any_length_sums_correctly(values in prop_vec(-1000i64..1000, 0..300)) {
        let expected = sequential_sum(&values);
        let parallel_expected = is_power_of_two(values.len()) && values.len() > 4;

        let outcome = reduce(values, &ReduceConfig::with_threads(4)).unwrap();
        prop_assert_eq!(outcome.sum, expected);
        prop_assert_eq!(outcome.is_parallel(), parallel_expected);
    }
}

// Property: repeated shrinks for one generation equal a single shrink
proptest! {
    #[test]
    fn prop_shrink_idempotent(exp in 1u32..12, generation in 1u64..12, repeats in 1usize..5) {
        let once = ReductionBuffer::new(vec![0i32; 1 << exp]);
        let many = ReductionBuffer::new(vec![0i32; 1 << exp]);

        once.shrink_if_needed(generation);
        for _ in 0..repeats {
            many.shrink_if_needed(generation);
        }

        prop_assert_eq!(once.len(), many.len());
        prop_assert_eq!(once.pending_len(), many.pending_len());
        prop_assert_eq!(many.len(), (1usize << exp) >> generation);
    }
}

// Property: concurrent claims partition the front half exactly
proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_claims_partition_front_half(exp in 1u32..14, workers in 1usize..8) {
        let len = 1usize << exp;
        let buffer = Arc::new(ReductionBuffer::new(vec![0u8; len]));

        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let buffer = Arc::clone(&buffer);
                thread::spawn(move || {
                    std::iter::from_fn(|| buffer.claim_next_index()).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for index in handle.join().unwrap() {
                prop_assert!(seen.insert(index));
            }
        }
        prop_assert_eq!(seen, (0..len / 2).collect::<HashSet<_>>());
    }
}

// Property: k cycles advance the generation by exactly k
proptest! {
    #![proptest_config(ProptestConfig {
        cases: 24,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_barrier_generation_counts_cycles(participants in 1usize..6, cycles in 1u64..40) {
        let barrier = Arc::new(ReusableBarrier::new(participants).unwrap());

        let handles: Vec<_> = (0..participants)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    for _ in 0..cycles {
                        barrier.wait();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        prop_assert_eq!(barrier.generation_count(), cycles);
        prop_assert_eq!(barrier.arrived(), 0);
    }
}
