//! Pajek partition output
//!
//! A `.clu` file holds `*Vertices n` followed by one 1-based cluster number per
//! node, in node order. Nodes outside every cluster are written as 0.

use anyhow::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cluster::ClusteringResult;

/// 1-based cluster number for every node (0 when unassigned).
///
/// A node in several clusters takes the one listed last.
pub fn partition_assignments(result: &ClusteringResult) -> Vec<usize> {
    let mut assignment = vec![0usize; result.node_count];
    for (position, cluster) in result.clusters.iter().enumerate() {
        for &node in &cluster.members {
            if let Some(slot) = assignment.get_mut(node) {
                *slot = position + 1;
            }
        }
    }
    assignment
}

/// Write the partition in Pajek `.clu` format
pub fn write_pajek_partition<W: Write>(writer: &mut W, result: &ClusteringResult) -> Result<()> {
    writeln!(writer, "*Vertices {}", result.node_count)?;
    for cluster_number in partition_assignments(result) {
        writeln!(writer, "{}", cluster_number)?;
    }
    Ok(())
}

/// `<prefix>.clu`, where prefix is the input file stem up to its first `_`
pub fn partition_file_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("clusters");
    let prefix = stem.split('_').next().filter(|p| !p.is_empty()).unwrap_or(stem);
    format!("{}.clu", prefix)
}

/// Write the `.clu` file for `input` into `output_dir`
pub fn save_partition(result: &ClusteringResult, input: &Path, output_dir: &str) -> Result<PathBuf> {
    let path = Path::new(output_dir).join(partition_file_name(input));
    log::info!("Writing Pajek partition to {}", path.display());

    let mut writer = BufWriter::new(File::create(&path)?);
    write_pajek_partition(&mut writer, result)?;
    writer.flush()?;

    Ok(path)
}
