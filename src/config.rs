//! Configuration management for the Markov clustering analyzer

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::data::DatasetFormat;
use crate::error::MclError;

/// Entries at or below this value are zeroed after every iteration
pub const DEFAULT_PRUNE_THRESHOLD: f64 = 0.005;

/// Iteration cap used when the matrix never reaches a fixed point
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Parameters of a single clustering run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MclConfig {
    /// Matrix power applied during expansion
    pub expansion_power: u32,

    /// Elementwise exponent applied during inflation
    pub inflation_power: f64,

    /// Pruning threshold
    pub prune_threshold: f64,

    /// Maximum number of expand/inflate/normalize/prune iterations
    pub max_iterations: usize,
}

impl Default for MclConfig {
    fn default() -> Self {
        Self {
            expansion_power: 2,
            inflation_power: 2.0,
            prune_threshold: DEFAULT_PRUNE_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl MclConfig {
    /// Create a configuration with the given powers and default pruning/iteration cap
    pub fn new(expansion_power: u32, inflation_power: f64) -> Self {
        Self {
            expansion_power,
            inflation_power,
            ..Self::default()
        }
    }

    pub fn with_expansion(mut self, power: u32) -> Self {
        self.expansion_power = power;
        self
    }

    pub fn with_inflation(mut self, power: f64) -> Self {
        self.inflation_power = power;
        self
    }

    pub fn with_prune_threshold(mut self, threshold: f64) -> Self {
        self.prune_threshold = threshold;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Check that the parameters keep the iteration contractive and sharpening
    pub fn validate(&self) -> Result<(), MclError> {
        if self.expansion_power < 1 {
            return Err(MclError::InvalidExpansion {
                power: self.expansion_power,
            });
        }
        if !self.inflation_power.is_finite() || self.inflation_power <= 1.0 {
            return Err(MclError::InvalidInflation {
                power: self.inflation_power,
            });
        }
        if !self.prune_threshold.is_finite()
            || self.prune_threshold < 0.0
            || self.prune_threshold >= 1.0
        {
            return Err(MclError::InvalidThreshold {
                threshold: self.prune_threshold,
            });
        }
        if self.max_iterations == 0 {
            return Err(MclError::InvalidMaxIterations);
        }
        Ok(())
    }
}

/// Configuration for a full analyzer run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine parameters
    pub mcl: MclConfig,

    /// Layout of the input edge list
    pub format: DatasetFormat,

    /// Output directory for results
    pub output_dir: String,

    /// Write a Pajek partition (.clu) next to the JSON results
    pub write_partition: bool,

    /// Treat hitting the iteration cap as a failure
    pub require_convergence: bool,

    /// Worker threads (0 = all available cores)
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mcl: MclConfig::default(),
            format: DatasetFormat::SpaceSeparatedIds,
            output_dir: "cluster_results".to_string(),
            write_partition: true,
            require_convergence: false,
            threads: 0,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        Ok(config)
    }
}
