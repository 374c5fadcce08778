//! Delimited edge-list loader

use anyhow::{anyhow, Result};
use std::io::BufRead;

use crate::data::DatasetLoader;
use crate::graph::{GraphBuilder, UndirectedGraph};

/// How node fields are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Signed integers; `007` and `7` name the same node
    Integer,
    /// Any non-empty token
    Text,
}

/// Reads one undirected edge per line: two node fields separated by `delimiter`.
///
/// Blank lines and lines starting with `#` or `%` are skipped. Repeated delimiters
/// are treated as one, and fields after the second are ignored.
#[derive(Debug, Clone)]
pub struct EdgeListLoader {
    delimiter: char,
    labels: LabelKind,
}

impl EdgeListLoader {
    pub fn new(delimiter: char, labels: LabelKind) -> Self {
        Self { delimiter, labels }
    }

    fn parse_label(&self, field: &str, line_no: usize) -> Result<String> {
        match self.labels {
            LabelKind::Text => Ok(field.to_string()),
            LabelKind::Integer => field
                .parse::<i64>()
                .map(|id| id.to_string())
                .map_err(|_| anyhow!("line {}: '{}' is not an integer node id", line_no, field)),
        }
    }
}

impl DatasetLoader for EdgeListLoader {
    fn load_reader(&self, reader: &mut dyn BufRead) -> Result<UndirectedGraph> {
        let mut builder = GraphBuilder::new();
        let mut edges_read = 0usize;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let trimmed = line.trim_end();

            if trimmed.trim_start().is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
                continue;
            }

            let mut fields = trimmed
                .split(self.delimiter)
                .map(str::trim)
                .filter(|f| !f.is_empty());

            let (a, b) = match (fields.next(), fields.next()) {
                (Some(a), Some(b)) => (a, b),
                _ => return Err(anyhow!("line {}: expected two node fields", line_no)),
            };

            let a = self.parse_label(a, line_no)?;
            let b = self.parse_label(b, line_no)?;
            builder.add_edge(&a, &b);
            edges_read += 1;
        }

        log::debug!("Read {} edge lines", edges_read);

        if builder.node_count() == 0 {
            return Err(anyhow!("edge list contains no edges"));
        }

        builder.build()
    }
}
