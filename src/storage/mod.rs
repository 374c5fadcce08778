//! Results persistence module

use anyhow::Result;
use serde_json::{json, to_string_pretty, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::cluster::metrics;
use crate::cluster::ClusteringResult;
use crate::graph::UndirectedGraph;

/// Save analysis results to the specified directory
pub fn save_results(
    result: &ClusteringResult,
    graph: &UndirectedGraph,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} clusters to {}", result.clusters.len(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    write_json(&Path::new(output_dir).join("summary.json"), &summary_json(result, graph))?;
    write_json(&Path::new(output_dir).join("clusters.json"), &clusters_json(result, graph))?;

    log::info!("Results saved successfully");

    Ok(())
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;
    Ok(())
}

/// Run, graph and cluster-size statistics
pub fn summary_json(result: &ClusteringResult, graph: &UndirectedGraph) -> Value {
    let sizes: Vec<f64> = result.clusters.iter().map(|c| c.size as f64).collect();
    let coverage = metrics::coverage(result);

    let (mean_size, std_dev_size) = mean_and_std_dev(&sizes);

    let densities: Vec<f64> = result.clusters.iter().filter_map(|c| c.density).collect();
    let avg_density = if densities.is_empty() {
        Value::Null
    } else {
        json!(mean_and_std_dev(&densities).0)
    };

    let avg_degree = if graph.node_count == 0 {
        0.0
    } else {
        2.0 * graph.edge_count() as f64 / graph.node_count as f64
    };

    json!({
        "run": {
            "iterations": result.iterations,
            "termination": result.termination,
        },
        "graph_stats": {
            "node_count": graph.node_count,
            "edge_count": graph.edge_count(),
            "avg_degree": avg_degree,
        },
        "cluster_stats": {
            "cluster_count": result.clusters.len(),
            "largest_cluster_size": result.clusters.iter().map(|c| c.size).max().unwrap_or(0),
            "smallest_cluster_size": result.clusters.iter().map(|c| c.size).min().unwrap_or(0),
            "avg_cluster_size": mean_size,
            "std_dev_cluster_size": std_dev_size,
            "avg_density": avg_density,
        },
        "coverage": {
            "assigned_nodes": coverage.assigned,
            "unassigned_nodes": coverage.unassigned.len(),
            "overlapping_nodes": coverage.overlapping.len(),
        }
    })
}

/// Sample mean and standard deviation; (0, 0) for no values
fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    use statrs::statistics::Statistics;

    match values.len() {
        0 => (0.0, 0.0),
        1 => (values[0], 0.0),
        _ => (values.mean(), values.std_dev()),
    }
}

/// Every cluster with member labels resolved through the graph
pub fn clusters_json(result: &ClusteringResult, graph: &UndirectedGraph) -> Value {
    json!({
        "clusters": result.clusters.iter().map(|c| {
            json!({
                "id": c.id,
                "size": c.size,
                "density": c.density,
                "attractors": c.attractors.iter().map(|&a| graph.label(a)).collect::<Vec<_>>(),
                "members": c.members.iter().map(|&m| graph.label(m)).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>()
    })
}
