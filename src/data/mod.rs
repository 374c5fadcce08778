//! Dataset loading
//!
//! Loaders turn an external graph description into an [`UndirectedGraph`]; the caller
//! picks one per input format and converts the graph into an association matrix.

pub mod edge_list;

pub use edge_list::{EdgeListLoader, LabelKind};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::graph::UndirectedGraph;

/// Produces a graph (and so an association matrix and node count) from a source
pub trait DatasetLoader {
    /// Parse a graph from buffered text
    fn load_reader(&self, reader: &mut dyn BufRead) -> Result<UndirectedGraph>;

    /// Parse a graph from a file on disk
    fn load(&self, path: &Path) -> Result<UndirectedGraph> {
        log::info!("Reading edge list: {}", path.display());

        let file = File::open(path)
            .with_context(|| format!("File not found: {}", path.display()))?;
        let mut reader = BufReader::new(file);
        let graph = self
            .load_reader(&mut reader)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        log::info!(
            "Loaded graph with {} nodes and {} edges",
            graph.node_count,
            graph.edge_count()
        );
        Ok(graph)
    }
}

/// Supported input layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetFormat {
    /// `<id> <id>` per line with integer node ids (e.g. a web graph)
    SpaceSeparatedIds,
    /// `<label> <label>` per line with arbitrary string labels (e.g. a collaboration network)
    SpaceSeparatedLabels,
    /// `<id>\t<id>` per line with integer node ids (e.g. a metabolic network)
    TabSeparatedIds,
}

impl DatasetFormat {
    /// Loader implementing this format
    pub fn loader(self) -> Box<dyn DatasetLoader> {
        let loader = match self {
            DatasetFormat::SpaceSeparatedIds => EdgeListLoader::new(' ', LabelKind::Integer),
            DatasetFormat::SpaceSeparatedLabels => EdgeListLoader::new(' ', LabelKind::Text),
            DatasetFormat::TabSeparatedIds => EdgeListLoader::new('\t', LabelKind::Integer),
        };
        Box::new(loader)
    }
}
