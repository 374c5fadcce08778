//! Compressed adjacency representation of an undirected graph

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::mem;

use crate::matrix::AssociationMatrix;

/// Compressed sparse representation of an undirected, unweighted graph.
///
/// Every edge is stored in both endpoints' neighbour lists; self-loops are not
/// stored (they are added when building the association matrix).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndirectedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// offsets[i] to offsets[i+1] defines the neighbour range for node i
    pub offsets: Vec<u32>,

    /// Concatenated, sorted neighbour lists
    pub neighbors: Vec<u32>,

    /// Original label of every node, by dense index
    pub node_ids: Vec<String>,
}

impl UndirectedGraph {
    /// Neighbours of a node (excluding itself)
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.neighbors[start..end]
    }

    /// Check if there's an edge between `a` and `b`
    pub fn has_edge(&self, a: usize, b: u32) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    pub fn degree(&self, node: usize) -> usize {
        (self.offsets[node + 1] - self.offsets[node]) as usize
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// Label of a node, falling back to its index
    pub fn label(&self, node: usize) -> String {
        self.node_ids
            .get(node)
            .cloned()
            .unwrap_or_else(|| node.to_string())
    }

    /// Dense 0/1 adjacency matrix with a unit self-loop on every node.
    ///
    /// The result is symmetric and has no empty column.
    pub fn to_association_matrix(&self) -> AssociationMatrix {
        let n = self.node_count;
        let mut matrix = Array2::zeros((n, n));
        for node in 0..n {
            matrix[[node, node]] = 1.0;
            for &other in self.neighbors(node) {
                matrix[[node, other as usize]] = 1.0;
            }
        }
        matrix
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let neighbors = self.neighbors.capacity() * mem::size_of::<u32>();
        let ids: usize = self.node_ids.iter().map(|s| s.capacity()).sum();
        base + offsets + neighbors + ids
    }
}
