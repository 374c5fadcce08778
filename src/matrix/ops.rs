//! Normalization, expansion, inflation and pruning

use ndarray::parallel::prelude::*;
use ndarray::{Array2, Axis, Zip};

use super::{AssociationMatrix, PARALLEL_CELL_THRESHOLD};

fn is_large(matrix: &AssociationMatrix) -> bool {
    matrix.len() >= PARALLEL_CELL_THRESHOLD
}

/// Rescale every column to sum to 1 (column-stochastic form).
///
/// A column whose sum is zero is left at zero rather than divided.
pub fn normalize(matrix: &mut AssociationMatrix) {
    let mut sums = matrix.sum_axis(Axis(0));
    sums.mapv_inplace(|s| if s > 0.0 { s } else { 1.0 });

    if is_large(matrix) {
        matrix
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| row /= &sums);
    } else {
        *matrix /= &sums;
    }
}

/// Raise the matrix to an integer power by repeated squaring.
///
/// `expand(m, 0)` is the identity matrix.
pub fn expand(matrix: &AssociationMatrix, power: u32) -> AssociationMatrix {
    let mut result: Option<AssociationMatrix> = None;
    let mut base = matrix.clone();
    let mut remaining = power;

    while remaining > 0 {
        if remaining & 1 == 1 {
            result = Some(match result {
                Some(acc) => multiply(&acc, &base),
                None => base.clone(),
            });
        }
        remaining >>= 1;
        if remaining > 0 {
            base = multiply(&base, &base);
        }
    }

    result.unwrap_or_else(|| Array2::eye(matrix.nrows()))
}

/// Square matrix product, split across output rows for large matrices
fn multiply(a: &AssociationMatrix, b: &AssociationMatrix) -> AssociationMatrix {
    if !is_large(a) {
        return a.dot(b);
    }

    let mut out = Array2::zeros((a.nrows(), b.ncols()));
    Zip::from(out.rows_mut())
        .and(a.rows())
        .par_for_each(|mut out_row, a_row| out_row.assign(&a_row.dot(b)));
    out
}

/// Raise every entry to `power`. Entries must be non-negative.
pub fn inflate(matrix: &mut AssociationMatrix, power: f64) {
    if is_large(matrix) {
        matrix.par_mapv_inplace(|x| x.powf(power));
    } else {
        matrix.mapv_inplace(|x| x.powf(power));
    }
}

/// Zero every entry at or below `threshold`; larger entries are unchanged.
pub fn prune(matrix: &mut AssociationMatrix, threshold: f64) {
    let cut = move |x: f64| if x <= threshold { 0.0 } else { x };
    if is_large(matrix) {
        matrix.par_mapv_inplace(cut);
    } else {
        matrix.mapv_inplace(cut);
    }
}

/// Indices of columns whose entries are all zero
pub fn empty_columns(matrix: &AssociationMatrix) -> Vec<usize> {
    matrix
        .axis_iter(Axis(1))
        .enumerate()
        .filter(|(_, column)| column.iter().all(|&x| x == 0.0))
        .map(|(j, _)| j)
        .collect()
}

/// Number of strictly positive entries
pub fn nonzero_count(matrix: &AssociationMatrix) -> usize {
    matrix.iter().filter(|&&x| x > 0.0).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const EPS: f64 = 1e-12;

    fn sample() -> AssociationMatrix {
        array![
            [1.0, 1.0, 0.0, 0.0],
            [1.0, 1.0, 1.0, 0.0],
            [0.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
        ]
    }

    fn normalized_sample() -> AssociationMatrix {
        let mut m = sample();
        normalize(&mut m);
        m
    }

    #[test]
    fn test_normalize_columns_sum_to_one() {
        let m = normalized_sample();
        for column in m.axis_iter(Axis(1)) {
            assert!((column.sum() - 1.0).abs() < EPS);
        }
        assert!((m[[0, 1]] - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_normalize_keeps_empty_column_at_zero() {
        let mut m = array![[2.0, 0.0], [2.0, 0.0]];
        normalize(&mut m);
        assert_eq!(m, array![[0.5, 0.0], [0.5, 0.0]]);
    }

    #[test]
    fn test_normalize_parallel_path_matches() {
        let n = 300;
        let mut m = Array2::from_shape_fn((n, n), |(i, j)| ((i * 7 + j * 13) % 5) as f64 + 1.0);
        let mut expected = m.clone();
        let sums = expected.sum_axis(Axis(0));
        for ((_, j), x) in expected.indexed_iter_mut() {
            *x /= sums[j];
        }
        normalize(&mut m);
        assert!(m.abs_diff_eq(&expected, EPS));
    }

    #[test]
    fn test_expand_power_one_is_identity_operation() {
        let m = normalized_sample();
        assert_eq!(expand(&m, 1), m);
    }

    #[test]
    fn test_expand_power_zero_is_identity_matrix() {
        let m = normalized_sample();
        assert_eq!(expand(&m, 0), Array2::<f64>::eye(4));
    }

    #[test]
    fn test_expand_matches_repeated_multiplication() {
        let m = normalized_sample();
        let naive = m.dot(&m).dot(&m).dot(&m).dot(&m);
        assert!(expand(&m, 5).abs_diff_eq(&naive, EPS));
    }

    #[test]
    fn test_expand_power_addition() {
        let m = normalized_sample();
        let lhs = expand(&m, 5);
        let rhs = expand(&m, 2).dot(&expand(&m, 3));
        assert!(lhs.abs_diff_eq(&rhs, EPS));
    }

    #[test]
    fn test_expand_parallel_path_matches_dot() {
        let n = 260;
        let mut m = Array2::from_shape_fn((n, n), |(i, j)| if (i + j) % 3 == 0 { 1.0 } else { 0.25 });
        normalize(&mut m);
        let expected = m.dot(&m);
        assert!(expand(&m, 2).abs_diff_eq(&expected, 1e-10));
    }

    #[test]
    fn test_expand_preserves_column_stochastic() {
        let m = expand(&normalized_sample(), 3);
        for column in m.axis_iter(Axis(1)) {
            assert!((column.sum() - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_inflate_power_one_is_unchanged() {
        let mut m = normalized_sample();
        let original = m.clone();
        inflate(&mut m, 1.0);
        assert_eq!(m, original);
    }

    #[test]
    fn test_inflate_is_monotone_in_power() {
        let base = normalized_sample();
        let mut weak = base.clone();
        let mut strong = base.clone();
        inflate(&mut weak, 1.5);
        inflate(&mut strong, 3.0);
        for (w, s) in weak.iter().zip(strong.iter()) {
            assert!(s <= w);
        }
    }

    #[test]
    fn test_inflate_sharpens_contrast() {
        let mut m = array![[0.8, 0.5], [0.2, 0.5]];
        inflate(&mut m, 2.0);
        normalize(&mut m);
        assert!((m[[0, 0]] - 0.64 / 0.68).abs() < EPS);
        assert!((m[[0, 1]] - 0.5).abs() < EPS);
    }

    #[test]
    fn test_prune_zeroes_at_or_below_threshold() {
        let mut m = array![[0.005, 0.004], [0.0051, 0.9]];
        prune(&mut m, 0.005);
        assert_eq!(m, array![[0.0, 0.0], [0.0051, 0.9]]);
    }

    #[test]
    fn test_prune_parallel_path() {
        let n = 256;
        let mut m = Array2::from_elem((n, n), 0.001);
        m[[3, 4]] = 0.5;
        prune(&mut m, 0.005);
        assert_eq!(nonzero_count(&m), 1);
        assert_eq!(m[[3, 4]], 0.5);
    }

    #[test]
    fn test_empty_columns() {
        let m = array![[1.0, 0.0, 0.0], [0.0, 0.0, 2.0], [0.0, 0.0, 0.0]];
        assert_eq!(empty_columns(&m), vec![1]);
        assert_eq!(nonzero_count(&m), 2);
    }
}
