#![allow(dead_code)]

pub mod concurrent;

use cyclic_reduce::{input, InputConfig};

pub const FAST_TEST_LEN: usize = 1 << 10;
pub const MEDIUM_TEST_LEN: usize = 1 << 16;

pub fn ones(len: usize) -> Vec<i64> {
    vec![1; len]
}

pub fn random_values(len: usize, seed: u64) -> Vec<i64> {
    input::generate(&InputConfig {
        length: len,
        seed,
        max_value: 100,
    })
    .expect("valid input config")
}
