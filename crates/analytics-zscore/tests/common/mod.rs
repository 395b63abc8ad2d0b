//! Shared helpers for z-score integration tests

#![allow(dead_code)]

use analytics_core::{HomogenTable, NumericTable};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;

/// Row-major table of normal samples, column `j` drawn from N(10·j, (j+1)²)
pub fn normal_table(rows: usize, cols: usize, seed: u64) -> HomogenTable<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dists: Vec<Normal<f64>> = (0..cols)
        .map(|j| Normal::new(10.0 * j as f64, (j + 1) as f64).unwrap())
        .collect();
    let data = (0..rows * cols)
        .map(|i| dists[i % cols].sample(&mut rng))
        .collect();
    HomogenTable::from_vec(rows, cols, data).unwrap()
}

/// Column sums and sums of squares of a row-major table
pub fn column_sums(table: &HomogenTable<f64>, cols: usize) -> (Vec<f64>, Vec<f64>) {
    let mut sums = vec![0.0; cols];
    let mut squares = vec![0.0; cols];
    for (i, &x) in table.as_slice().iter().enumerate() {
        sums[i % cols] += x;
        squares[i % cols] += x * x;
    }
    (sums, squares)
}

/// Naive population mean and variance of one column
pub fn naive_column_stats(table: &HomogenTable<f64>, col: usize) -> (f64, f64) {
    let mut values = Vec::new();
    table.read_column(col, &mut values).unwrap();
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
    (mean, var)
}

/// Assert two slices are equal within 1e-10
pub fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (&a, &e) in actual.iter().zip(expected) {
        approx::assert_relative_eq!(a, e, epsilon = 1e-10, max_relative = 1e-10);
    }
}
