//! Property-based tests for z-score normalization

mod common;

use analytics_core::{scalar_sequential, simd_sequential, Error, HomogenTable, NumericTable};
use analytics_zscore::{compute, Parameter, ResultsToCompute, ZScoreResult, ZeroVariancePolicy};
use approx::assert_relative_eq;
use proptest::prelude::*;

fn table_strategy() -> impl Strategy<Value = HomogenTable<f64>> {
    (1usize..40, 1usize..6).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(-1.0e3f64..1.0e3, rows * cols)
            .prop_map(move |data| HomogenTable::from_vec(rows, cols, data).unwrap())
    })
}

/// Random table with one constant column of any finite value, and that column's index
fn constant_column_strategy() -> impl Strategy<Value = (HomogenTable<f64>, usize)> {
    (2usize..40, 1usize..6).prop_flat_map(|(rows, cols)| {
        let value = any::<f64>().prop_filter("finite", |v| v.is_finite());
        (
            prop::collection::vec(-1.0e3f64..1.0e3, rows * cols),
            0..cols,
            value,
        )
            .prop_map(move |(mut data, constant, value)| {
                for row in data.chunks_mut(cols) {
                    row[constant] = value;
                }
                (HomogenTable::from_vec(rows, cols, data).unwrap(), constant)
            })
    })
}

/// First column whose values are all equal
fn first_constant_column(table: &HomogenTable<f64>) -> Option<usize> {
    let mut column = Vec::new();
    (0..table.n_cols()).find(|&j| {
        table.read_column(j, &mut column).unwrap();
        column.iter().all(|&x| x == column[0])
    })
}

proptest! {
    #[test]
    fn prop_output_shape_matches_input(table in table_strategy()) {
        let engine = scalar_sequential::<f64>();
        let mut result = ZScoreResult::new();
        compute(&table, &Parameter::default(), &engine, &mut result).unwrap();
        prop_assert_eq!(result.normalized_data().unwrap().shape(), table.shape());
    }

    #[test]
    fn prop_normalized_columns_are_centered(table in table_strategy()) {
        let engine = simd_sequential::<f64>();
        let mut result = ZScoreResult::new();
        compute(&table, &Parameter::default(), &engine, &mut result).unwrap();

        let (rows, cols) = table.shape();
        let data = result.normalized_data().unwrap();
        let mut column = Vec::new();
        for j in 0..cols {
            data.read_column(j, &mut column).unwrap();
            let mean = column.iter().sum::<f64>() / rows as f64;
            prop_assert!(mean.abs() < 1e-8, "column {} mean {}", j, mean);
            let var = column.iter().map(|x| x * x).sum::<f64>() / rows as f64;
            // unit variance, or zero for a constant column
            prop_assert!((var - 1.0).abs() < 1e-8 || var < 1e-12, "column {} variance {}", j, var);
        }
    }

    #[test]
    fn prop_standardized_data_is_a_fixed_point(table in table_strategy()) {
        let engine = scalar_sequential::<f64>();
        let mut once = ZScoreResult::new();
        compute(&table, &Parameter::default(), &engine, &mut once).unwrap();
        let standardized = once.normalized_data().unwrap().clone();

        let mut twice = ZScoreResult::new();
        compute(&standardized, &Parameter::default(), &engine, &mut twice).unwrap();

        let again = twice.normalized_data().unwrap().as_slice();
        for (a, b) in standardized.as_slice().iter().zip(again) {
            prop_assert!((a - b).abs() < 1e-8, "{} vs {}", a, b);
        }
    }

    #[test]
    fn prop_shift_invariance(table in table_strategy(), shift in -500.0f64..500.0) {
        let engine = scalar_sequential::<f64>();
        let (rows, cols) = table.shape();
        let shifted = HomogenTable::from_vec(
            rows,
            cols,
            table.as_slice().iter().map(|x| x + shift).collect(),
        )
        .unwrap();

        let parameter = Parameter::default().with_results(ResultsToCompute::VARIANCE);
        let mut a = ZScoreResult::new();
        let mut b = ZScoreResult::new();
        compute(&table, &parameter, &engine, &mut a).unwrap();
        compute(&shifted, &parameter, &engine, &mut b).unwrap();

        let va = a.variances().unwrap().as_slice();
        let vb = b.variances().unwrap().as_slice();
        for (x, y) in va.iter().zip(vb) {
            prop_assert!((x - y).abs() <= 1e-6 * (1.0 + x.abs()));
        }
    }

    #[test]
    fn prop_constant_column_normalizes_to_zero((table, constant) in constant_column_strategy()) {
        let engine = simd_sequential::<f64>();
        let parameter = Parameter::default().with_results(ResultsToCompute::VARIANCE);
        let mut result = ZScoreResult::new();
        compute(&table, &parameter, &engine, &mut result).unwrap();

        let mut column = Vec::new();
        result.normalized_data().unwrap().read_column(constant, &mut column).unwrap();
        prop_assert!(column.iter().all(|&z| z == 0.0), "column {} is {:?}", constant, column);
        prop_assert_eq!(result.variances().unwrap().as_slice()[constant], 0.0);
    }

    #[test]
    fn prop_constant_column_is_rejected((table, constant) in constant_column_strategy()) {
        let engine = scalar_sequential::<f64>();
        let strict = Parameter::default().with_zero_variance(ZeroVariancePolicy::Reject);
        let mut result = ZScoreResult::new();

        let first = first_constant_column(&table).unwrap();
        prop_assert!(first <= constant);
        match compute(&table, &strict, &engine, &mut result) {
            Err(Error::DegenerateColumn { column }) => prop_assert_eq!(column, first),
            other => prop_assert!(false, "expected a degenerate column, got {:?}", other.err()),
        }
        prop_assert!(result.normalized_data().is_none());
    }
}

#[test]
fn test_known_example_values() {
    let table = HomogenTable::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
    let engine = scalar_sequential::<f64>();
    let parameter =
        Parameter::default().with_results(ResultsToCompute::MEAN | ResultsToCompute::VARIANCE);
    let mut result = ZScoreResult::new();
    compute(&table, &parameter, &engine, &mut result).unwrap();

    let expected = [-1.224_744_871, -1.224_744_871, 0.0, 0.0, 1.224_744_871, 1.224_744_871];
    for (a, e) in result.normalized_data().unwrap().as_slice().iter().zip(expected) {
        assert_relative_eq!(*a, e, epsilon = 1e-9);
    }
    common::assert_close(result.variances().unwrap().as_slice(), &[8.0 / 3.0, 8.0 / 3.0]);
}
