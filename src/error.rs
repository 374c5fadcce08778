//! Error types for the clustering engine

use thiserror::Error;

/// Errors raised while validating the engine's input matrix or parameters.
///
/// Every variant is detected once at the entry point, before the first iteration.
/// Running out of iterations is not an error; see [`crate::mcl::Termination`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MclError {
    #[error("association matrix is empty")]
    EmptyMatrix,

    #[error("association matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("negative entry {value} at ({row}, {col})")]
    NegativeEntry { row: usize, col: usize, value: f64 },

    #[error("non-finite entry at ({row}, {col})")]
    NonFiniteEntry { row: usize, col: usize },

    #[error("column {column} is entirely zero")]
    EmptyColumn { column: usize },

    #[error("node {node} has no self-loop (zero diagonal entry)")]
    MissingSelfLoop { node: usize },

    #[error("expansion power must be at least 1, got {power}")]
    InvalidExpansion { power: u32 },

    #[error("inflation power must be a finite value greater than 1, got {power}")]
    InvalidInflation { power: f64 },

    #[error("prune threshold must lie in [0, 1), got {threshold}")]
    InvalidThreshold { threshold: f64 },

    #[error("maximum iteration count must be at least 1")]
    InvalidMaxIterations,
}

impl MclError {
    /// True when the error describes the matrix rather than the parameters.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MclError::EmptyMatrix
                | MclError::NotSquare { .. }
                | MclError::NegativeEntry { .. }
                | MclError::NonFiniteEntry { .. }
                | MclError::EmptyColumn { .. }
                | MclError::MissingSelfLoop { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_and_parameter_errors_are_distinguished() {
        assert!(MclError::EmptyColumn { column: 3 }.is_input_error());
        assert!(MclError::NotSquare { rows: 2, cols: 3 }.is_input_error());
        assert!(!MclError::InvalidInflation { power: 1.0 }.is_input_error());
        assert!(!MclError::InvalidMaxIterations.is_input_error());
    }

    #[test]
    fn test_messages_name_the_offending_position() {
        let err = MclError::NegativeEntry { row: 1, col: 2, value: -0.5 };
        assert_eq!(err.to_string(), "negative entry -0.5 at (1, 2)");
    }
}
