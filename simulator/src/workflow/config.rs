use anyhow::Context;
use scopecore::prelude::StageConfig;
use scopecore::zone::GridSpace;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::generator::profile::GeneratorConfig;

/// Zone-editor surface in pixels plus the configured cell density.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: f64,
    pub height: f64,
    pub cell_count: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            cell_count: 12,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub target_width: usize,
    pub spectrum_bins: usize,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,
    #[serde(default = "default_peak_factor")]
    pub peak_factor: f64,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

fn default_sample_rate() -> f64 {
    80_000.0
}

fn default_peak_factor() -> f64 {
    1.2
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(target_width: usize, spectrum_bins: usize, grid: GridConfig) -> Self {
        Self {
            target_width,
            spectrum_bins,
            sample_rate: default_sample_rate(),
            peak_factor: default_peak_factor(),
            grid,
            generator: GeneratorConfig::default(),
        }
    }

    pub fn to_stage_config(&self, kernel: Vec<f64>) -> StageConfig {
        StageConfig {
            kernel,
            target_width: self.target_width,
            spectrum_bins: self.spectrum_bins,
            sample_rate: self.sample_rate,
            peak_factor: self.peak_factor,
        }
    }

    pub fn grid_space(&self) -> anyhow::Result<GridSpace> {
        GridSpace::new(self.grid.width, self.grid.height, self.grid.cell_count)
            .context("building zone grid from workflow config")
    }
}
