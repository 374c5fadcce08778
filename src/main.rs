use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

use markov_cluster::cluster::metrics;
use markov_cluster::data::DatasetFormat;
use markov_cluster::{cluster_matrix, storage, viz, Config};

#[derive(Parser, Debug)]
#[clap(
    name = "markov-cluster",
    about = "Markov clustering (MCL) of undirected graphs given as edge lists"
)]
struct Cli {
    /// Path to input edge list
    #[clap(long)]
    input: PathBuf,

    /// Layout of the edge list
    #[clap(long, value_enum)]
    format: Option<DatasetFormat>,

    /// JSON config file; command line values override it
    #[clap(long)]
    config: Option<PathBuf>,

    /// Output directory for results
    #[clap(long)]
    output_dir: Option<String>,

    /// Expansion power (positive integer)
    #[clap(long)]
    expansion: Option<u32>,

    /// Inflation power (> 1)
    #[clap(long)]
    inflation: Option<f64>,

    /// Entries at or below this value are pruned
    #[clap(long)]
    prune_threshold: Option<f64>,

    /// Maximum number of iterations
    #[clap(long)]
    max_iterations: Option<usize>,

    /// Skip the Pajek partition file
    #[clap(long)]
    skip_partition: bool,

    /// Fail if the iteration cap is reached before convergence
    #[clap(long)]
    require_convergence: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long)]
    threads: Option<usize>,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<(Config, PathBuf)> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(power) = self.expansion {
            config.mcl.expansion_power = power;
        }
        if let Some(power) = self.inflation {
            config.mcl.inflation_power = power;
        }
        if let Some(threshold) = self.prune_threshold {
            config.mcl.prune_threshold = threshold;
        }
        if let Some(max) = self.max_iterations {
            config.mcl.max_iterations = max;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        config.write_partition &= !self.skip_partition;
        config.require_convergence |= self.require_convergence;

        Ok((config, self.input))
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let (config, input) = args.into_config()?;

    // Set number of threads
    let num_threads = if config.threads > 0 {
        config.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting Markov clustering");
    log::info!("Input: {} ({:?})", input.display(), config.format);
    log::info!("Output: {}", config.output_dir);

    std::fs::create_dir_all(&config.output_dir)?;

    // 1. Load data
    let graph = config.format.loader().load(&input)?;
    log::info!("Number of Vertices : {}", graph.node_count);
    log::debug!("Graph memory usage: {} bytes", graph.memory_usage());

    // 2. Cluster
    let association = graph.to_association_matrix();
    let mut result = cluster_matrix(association, &config.mcl).map_err(|err| {
        if err.is_input_error() {
            anyhow!("Bad input: {}", err)
        } else {
            anyhow!("Bad parameters: {}", err)
        }
    })?;

    log::info!("Number of Iterations : {}", result.iterations);
    log::info!("Number of Clusters : {}", result.clusters.len());

    if config.require_convergence && !result.termination.is_converged() {
        return Err(anyhow!(
            "Did not converge within {} iterations",
            result.iterations
        ));
    }

    metrics::annotate_densities(&mut result.clusters, &graph);
    let coverage = metrics::coverage(&result);
    if !coverage.overlapping.is_empty() {
        log::warn!("{} nodes belong to more than one cluster", coverage.overlapping.len());
    }

    // 3. Save results
    storage::save_results(&result, &graph, &config.output_dir)?;

    // 4. Pajek partition
    if config.write_partition {
        viz::save_partition(&result, &input, &config.output_dir)?;
    }

    log::info!("Analysis complete. Results saved to {}", config.output_dir);

    Ok(())
}
