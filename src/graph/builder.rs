//! Graph construction module

use anyhow::{anyhow, Result};
use std::collections::HashMap;

use crate::graph::UndirectedGraph;

/// Builder for incrementally constructing an UndirectedGraph
pub struct GraphBuilder {
    /// Mapping from labels to dense node indices
    id_to_index: HashMap<String, u32>,

    /// Node labels in first-appearance order
    node_ids: Vec<String>,

    /// Adjacency lists for each node
    adjacency_lists: Vec<Vec<u32>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new graph builder with the given node capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            adjacency_lists: Vec::with_capacity(capacity),
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Get or create the dense index for a label
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());
        self.adjacency_lists.push(Vec::new());

        idx
    }

    /// Add an undirected edge. Both endpoints are registered; a self-loop only
    /// registers the node.
    pub fn add_edge(&mut self, a_id: &str, b_id: &str) {
        let a = self.get_or_create_node(a_id);
        let b = self.get_or_create_node(b_id);
        if a == b {
            return;
        }

        self.adjacency_lists[a as usize].push(b);
        self.adjacency_lists[b as usize].push(a);
    }

    /// Build the compressed graph, dropping duplicate edges
    pub fn build(mut self) -> Result<UndirectedGraph> {
        let node_count = self.node_ids.len();
        if node_count > u32::MAX as usize {
            return Err(anyhow!("Too many nodes: {}", node_count));
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);

        let mut neighbors = Vec::new();
        for list in &mut self.adjacency_lists {
            // Sort for binary search efficiency
            list.sort_unstable();
            list.dedup();
            neighbors.extend_from_slice(list);
            offsets.push(neighbors.len() as u32);
        }

        Ok(UndirectedGraph {
            node_count,
            offsets,
            neighbors,
            node_ids: self.node_ids,
        })
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
