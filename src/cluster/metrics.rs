//! Cluster statistics and metrics

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::cluster::{Cluster, ClusteringResult, NodeIndex};
use crate::graph::UndirectedGraph;

/// Calculate density (internal edges / potential undirected edges)
pub fn cluster_density(graph: &UndirectedGraph, members: &[NodeIndex]) -> f64 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    let potential_edges = n * (n - 1) / 2;
    let member_set: HashSet<u32> = members.iter().map(|&m| m as u32).collect();

    // Each internal edge is seen from both endpoints
    let endpoint_hits: usize = members
        .iter()
        .map(|&node| {
            graph
                .neighbors(node)
                .iter()
                .filter(|&&dst| member_set.contains(&dst))
                .count()
        })
        .sum();

    (endpoint_hits / 2) as f64 / potential_edges as f64
}

/// Fill in the density of every cluster against the input graph
pub fn annotate_densities(clusters: &mut [Cluster], graph: &UndirectedGraph) {
    for cluster in clusters.iter_mut() {
        cluster.density = Some(cluster_density(graph, &cluster.members));
    }
}

/// How the clusters cover the node range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    /// Nodes in at least one cluster
    pub assigned: usize,

    /// Nodes in no cluster
    pub unassigned: Vec<NodeIndex>,

    /// Nodes in more than one cluster
    pub overlapping: Vec<NodeIndex>,
}

/// Count cluster memberships per node
pub fn coverage(result: &ClusteringResult) -> Coverage {
    let mut memberships = vec![0usize; result.node_count];
    for cluster in &result.clusters {
        for &node in &cluster.members {
            if let Some(count) = memberships.get_mut(node) {
                *count += 1;
            }
        }
    }

    let unassigned: Vec<NodeIndex> = (0..result.node_count)
        .filter(|&i| memberships[i] == 0)
        .collect();
    let overlapping: Vec<NodeIndex> = (0..result.node_count)
        .filter(|&i| memberships[i] > 1)
        .collect();

    Coverage {
        assigned: result.node_count - unassigned.len(),
        unassigned,
        overlapping,
    }
}
