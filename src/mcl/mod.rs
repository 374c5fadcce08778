//! The Markov clustering iteration
//!
//! The matrix is normalized once, then expand -> inflate -> normalize -> prune is
//! repeated until two consecutive (already pruned) matrices are exactly equal or the
//! iteration cap is reached.

use log;
use serde::{Deserialize, Serialize};

use crate::cluster::{detection, ClusteringResult};
use crate::config::MclConfig;
use crate::error::MclError;
use crate::matrix::{self, AssociationMatrix};

/// How the iteration ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Two consecutive iterations produced the same matrix
    Converged,
    /// The iteration cap was hit first; the last matrix is returned as-is
    MaxIterationsReached,
}

impl Termination {
    pub fn is_converged(self) -> bool {
        self == Termination::Converged
    }
}

/// Output of the iteration: the final matrix plus how it was reached
#[derive(Debug, Clone)]
pub struct MclRun {
    pub matrix: AssociationMatrix,
    pub iterations: usize,
    pub termination: Termination,
}

/// One expand -> inflate -> normalize -> prune step
pub fn iterate(current: &AssociationMatrix, config: &MclConfig) -> AssociationMatrix {
    let mut next = matrix::expand(current, config.expansion_power);
    matrix::inflate(&mut next, config.inflation_power);
    matrix::normalize(&mut next);
    matrix::prune(&mut next, config.prune_threshold);
    next
}

/// Run the iteration to a fixed point (or the cap) on a raw association matrix.
///
/// The matrix and parameters are validated once here; nothing inside the loop fails.
pub fn markov_clustering(
    mut association: AssociationMatrix,
    config: &MclConfig,
) -> Result<MclRun, MclError> {
    config.validate()?;
    matrix::validate(&association)?;

    let n = association.nrows();
    log::info!(
        "Running MCL on {} nodes (expansion={}, inflation={}, threshold={}, max_iterations={})",
        n,
        config.expansion_power,
        config.inflation_power,
        config.prune_threshold,
        config.max_iterations
    );

    matrix::normalize(&mut association);

    let mut previous = association;
    let mut iterations = 0;
    let mut collapsed_columns = 0;

    let termination = loop {
        let next = iterate(&previous, config);
        iterations += 1;

        log::debug!(
            "Iteration {}: {} non-zero entries",
            iterations,
            matrix::nonzero_count(&next)
        );

        let empty = matrix::empty_columns(&next).len();
        if empty > collapsed_columns {
            log::warn!(
                "{} column(s) pruned to zero at iteration {}; those nodes carry no flow",
                empty,
                iterations
            );
            collapsed_columns = empty;
        }

        let unchanged = next == previous;
        previous = next;

        if unchanged {
            break Termination::Converged;
        }
        if iterations >= config.max_iterations {
            break Termination::MaxIterationsReached;
        }
    };

    match termination {
        Termination::Converged => log::info!("Converged after {} iterations", iterations),
        Termination::MaxIterationsReached => log::warn!(
            "Did not converge within {} iterations; using last matrix",
            iterations
        ),
    }

    Ok(MclRun {
        matrix: previous,
        iterations,
        termination,
    })
}

/// Run the iteration and extract clusters from the final matrix
pub fn cluster_matrix(
    association: AssociationMatrix,
    config: &MclConfig,
) -> Result<ClusteringResult, MclError> {
    let node_count = association.nrows();
    let run = markov_clustering(association, config)?;
    let clusters = detection::extract_clusters(&run.matrix);

    log::info!("Found {} clusters", clusters.len());

    Ok(ClusteringResult {
        node_count,
        iterations: run.iterations,
        termination: run.termination,
        clusters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_single_node_converges_in_one_iteration() {
        let run = markov_clustering(array![[1.0]], &MclConfig::default()).unwrap();
        assert_eq!(run.iterations, 1);
        assert_eq!(run.termination, Termination::Converged);
        assert_eq!(run.matrix, array![[1.0]]);
    }

    #[test]
    fn test_block_diagonal_converges_immediately() {
        let mut m = Array2::zeros((4, 4));
        for i in 0..2 {
            for j in 0..2 {
                m[[i, j]] = 1.0;
                m[[i + 2, j + 2]] = 1.0;
            }
        }
        let run = markov_clustering(m, &MclConfig::default()).unwrap();
        assert_eq!(run.termination, Termination::Converged);
        assert_eq!(run.iterations, 1);
        assert_eq!(run.matrix[[0, 1]], 0.5);
        assert_eq!(run.matrix[[0, 2]], 0.0);
    }

    #[test]
    fn test_iteration_cap_is_respected() {
        let m = array![
            [1.0, 1.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0, 0.0, 0.0],
            [0.0, 1.0, 1.0, 1.0, 0.0],
            [0.0, 0.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0, 1.0],
        ];
        let config = MclConfig::default().with_max_iterations(1);
        let run = markov_clustering(m, &config).unwrap();
        assert_eq!(run.iterations, 1);
        assert_eq!(run.termination, Termination::MaxIterationsReached);
    }

    #[test]
    fn test_fixed_point_is_idempotent() {
        let m = array![
            [1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        ];
        let config = MclConfig::default();
        let run = markov_clustering(m, &config).unwrap();
        assert!(run.iterations <= config.max_iterations);
        if run.termination.is_converged() {
            assert_eq!(iterate(&run.matrix, &config), run.matrix);
        }
    }

    #[test]
    fn test_invalid_parameters_rejected_before_iterating() {
        let config = MclConfig::default().with_inflation(0.5);
        let err = markov_clustering(array![[1.0]], &config).unwrap_err();
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_malformed_matrix_rejected() {
        let err = markov_clustering(array![[1.0, 0.0], [0.0, 0.0]], &MclConfig::default())
            .unwrap_err();
        assert_eq!(err, MclError::EmptyColumn { column: 1 });
    }

    #[test]
    fn test_cluster_matrix_reports_run_details() {
        let result = cluster_matrix(Array2::ones((3, 3)), &MclConfig::default()).unwrap();
        assert_eq!(result.node_count, 3);
        assert_eq!(result.termination, Termination::Converged);
        assert_eq!(result.clusters.len(), 1);
        assert_eq!(result.clusters[0].members, vec![0, 1, 2]);
    }
}
