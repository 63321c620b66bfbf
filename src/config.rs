//! Run configuration, read from a TOML file and overridden from the command line

use crate::cluster::validate_parameters;
use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Parameters of a grouping run
///
/// Every key is optional in the file; missing keys take the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// JSON file with the trajectory records
    pub trajectory_src_path: PathBuf,
    /// Maximum distance for two trajectories to be neighbours
    pub eps: f64,
    /// Minimum neighbourhood size for a core trajectory
    pub min_samples: usize,
    /// Compute the distance matrix on all cores
    pub parallel: bool,
    /// Labels CSV, stdout when unset
    pub save_labels_path: Option<PathBuf>,
    /// Distance matrix CSV, skipped when unset
    pub save_dist_matrix_path: Option<PathBuf>,
    /// Grouped trajectories CSV, skipped when unset
    pub save_grouped_trajectories_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trajectory_src_path: PathBuf::from("trajectories.json"),
            eps: 20.0,
            min_samples: 6,
            parallel: true,
            save_labels_path: None,
            save_dist_matrix_path: None,
            save_grouped_trajectories_path: None,
        }
    }
}

impl Config {
    /// Loads and validates a configuration file
    pub fn load(path: &Path) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_parameters(self.eps, self.min_samples)
    }
}
