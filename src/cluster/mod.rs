//! Cluster analysis module

pub mod detection;
pub mod metrics;

use serde::{Deserialize, Serialize};

use crate::mcl::Termination;

/// Dense node index in [0, n)
pub type NodeIndex = usize;

/// A group of nodes sharing flow from at least one attractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Position of this cluster in the (sorted) result
    pub id: usize,

    /// Members of this cluster, ascending
    pub members: Vec<NodeIndex>,

    /// Size of the cluster
    pub size: usize,

    /// Attractor rows that produced this member set
    pub attractors: Vec<NodeIndex>,

    /// Internal edge density against the input graph, when computed
    pub density: Option<f64>,
}

impl Cluster {
    pub fn contains(&self, node: NodeIndex) -> bool {
        self.members.binary_search(&node).is_ok()
    }
}

/// Clusters extracted from one run, with the run's observability signals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringResult {
    /// Number of nodes in the input matrix
    pub node_count: usize,

    /// Iterations executed
    pub iterations: usize,

    /// Terminal state of the iteration
    pub termination: Termination,

    /// De-duplicated clusters, ordered by member list
    pub clusters: Vec<Cluster>,
}

impl ClusteringResult {
    /// Ids of every cluster that contains `node`
    pub fn clusters_of(&self, node: NodeIndex) -> Vec<usize> {
        self.clusters
            .iter()
            .filter(|c| c.contains(node))
            .map(|c| c.id)
            .collect()
    }
}
