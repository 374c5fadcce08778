//! Markov clustering (MCL) of undirected graphs
//!
//! The core is [`mcl::cluster_matrix`]: given a square, non-negative association
//! matrix with self-loops and an [`MclConfig`], it iterates expansion, inflation,
//! normalization and pruning to a fixed point and reads clusters off the result.

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod mcl;
pub mod storage;
pub mod viz;

pub use cluster::{Cluster, ClusteringResult, NodeIndex};
pub use config::{Config, MclConfig};
pub use error::MclError;
pub use mcl::{cluster_matrix, markov_clustering, MclRun, Termination};
