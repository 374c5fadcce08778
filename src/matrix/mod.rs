//! Dense association matrix operators
//!
//! The engine works on column-stochastic `Array2<f64>` matrices: entry (i, j) is the
//! flow from node j to node i. Each operator here is one stage of an MCL iteration.

pub mod ops;

pub use ops::{empty_columns, expand, inflate, nonzero_count, normalize, prune};

use ndarray::Array2;

use crate::error::MclError;

/// Association matrix type used throughout the crate
pub type AssociationMatrix = Array2<f64>;

/// Matrices with at least this many cells are processed with rayon
pub(crate) const PARALLEL_CELL_THRESHOLD: usize = 256 * 256;

/// Check the input contract: square, non-empty, finite non-negative entries,
/// no empty column and a self-loop on every node.
pub fn validate(matrix: &AssociationMatrix) -> Result<(), MclError> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(MclError::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Err(MclError::EmptyMatrix);
    }

    for ((row, col), &value) in matrix.indexed_iter() {
        if !value.is_finite() {
            return Err(MclError::NonFiniteEntry { row, col });
        }
        if value < 0.0 {
            return Err(MclError::NegativeEntry { row, col, value });
        }
    }

    if let Some(&column) = empty_columns(matrix).first() {
        return Err(MclError::EmptyColumn { column });
    }

    if let Some(node) = (0..rows).find(|&i| matrix[[i, i]] == 0.0) {
        return Err(MclError::MissingSelfLoop { node });
    }

    Ok(())
}
