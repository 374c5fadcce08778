//! Cluster extraction from the converged flow matrix

use std::collections::{BTreeMap, BTreeSet};

use crate::cluster::{Cluster, NodeIndex};
use crate::matrix::AssociationMatrix;

/// Read clusters off a converged (or iteration-capped) matrix.
///
/// Every row `i` with a positive diagonal entry is an attractor; the columns with
/// positive flow in that row form one cluster. Member sets are compared as ordered
/// sets, so attractors that yield the same set collapse into one cluster. A node may
/// end up in more than one cluster.
pub fn extract_clusters(matrix: &AssociationMatrix) -> Vec<Cluster> {
    let mut by_members: BTreeMap<BTreeSet<NodeIndex>, Vec<NodeIndex>> = BTreeMap::new();

    for (attractor, row) in matrix.outer_iter().enumerate() {
        if row[attractor] <= 0.0 {
            continue;
        }

        let members: BTreeSet<NodeIndex> = row
            .iter()
            .enumerate()
            .filter(|(_, &flow)| flow > 0.0)
            .map(|(j, _)| j)
            .collect();

        by_members.entry(members).or_default().push(attractor);
    }

    log::debug!(
        "{} attractor rows produced {} distinct clusters",
        by_members.values().map(Vec::len).sum::<usize>(),
        by_members.len()
    );

    by_members
        .into_iter()
        .enumerate()
        .map(|(id, (members, attractors))| {
            let members: Vec<NodeIndex> = members.into_iter().collect();
            Cluster {
                id,
                size: members.len(),
                members,
                attractors,
                density: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_attractor_rows_become_clusters() {
        // Node 0 attracts 0 and 1, node 2 attracts itself and 3.
        let m = array![
            [1.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 0.0, 0.0],
        ];
        let clusters = extract_clusters(&m);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members, vec![0, 1]);
        assert_eq!(clusters[0].attractors, vec![0]);
        assert_eq!(clusters[1].members, vec![2, 3]);
        assert_eq!(clusters[1].id, 1);
        assert_eq!(clusters[1].size, 2);
    }

    #[test]
    fn test_identical_sets_are_merged() {
        let m = array![[0.5, 0.5, 0.0], [0.5, 0.5, 0.0], [0.0, 0.0, 1.0]];
        let clusters = extract_clusters(&m);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].members, vec![0, 1]);
        assert_eq!(clusters[0].attractors, vec![0, 1]);
        assert_eq!(clusters[1].members, vec![2]);
    }

    #[test]
    fn test_overlap_is_preserved() {
        // Column 1 splits its flow between attractors 0 and 2.
        let m = array![[1.0, 0.5, 0.0], [0.0, 0.0, 0.0], [0.0, 0.5, 1.0]];
        let clusters = extract_clusters(&m);
        assert_eq!(clusters.len(), 2);
        assert!(clusters.iter().all(|c| c.contains(1)));
    }

    #[test]
    fn test_rows_without_diagonal_flow_are_ignored() {
        let m = array![[0.0, 0.0], [1.0, 1.0]];
        let clusters = extract_clusters(&m);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members, vec![0, 1]);
        assert_eq!(clusters[0].attractors, vec![1]);
    }
}
