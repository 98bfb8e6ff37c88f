//! Matrix generators shared by the unit tests.
use crate::matrix::CostMatrix;
use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn uniform_f64(seed: u64, size: usize, min_value: f64, max_value: f64) -> CostMatrix<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let between = Uniform::from(min_value..max_value);
    CostMatrix::from_fn(size, |_, _| between.sample(&mut rng)).unwrap()
}

pub fn uniform_i64(seed: u64, size: usize, min_value: i64, max_value: i64) -> CostMatrix<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let between = Uniform::from(min_value..max_value);
    CostMatrix::from_fn(size, |_, _| between.sample(&mut rng)).unwrap()
}

pub fn negated<C: crate::Cost>(matrix: &CostMatrix<C>) -> CostMatrix<C> {
    CostMatrix::from_fn(matrix.size(), |i, j| -matrix.get(i, j)).unwrap()
}
