use serde::{Deserialize, Serialize};

/// Shared configuration for each processing stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    /// Reference waveform correlated against incoming samples.
    pub kernel: Vec<f64>,
    /// Display width the resampler stretches or compresses to.
    pub target_width: usize,
    pub spectrum_bins: usize,
    pub sample_rate: f64,
    /// Peaks must exceed `rms * peak_factor` to be reported.
    pub peak_factor: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            kernel: vec![1.0],
            target_width: 512,
            spectrum_bins: 256,
            sample_rate: 1.0,
            peak_factor: 1.2,
        }
    }
}

/// Input payload for a processing stage.
#[derive(Debug, Clone)]
pub struct StageInput {
    /// In-phase (or real) samples.
    pub samples: Vec<f64>,
    /// Quadrature samples, when the source is an I/Q pair.
    pub quadrature: Option<Vec<f64>>,
    pub timestamp: Option<f64>,
}

impl StageInput {
    pub fn real(samples: Vec<f64>) -> Self {
        Self {
            samples,
            quadrature: None,
            timestamp: None,
        }
    }
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub samples: Vec<f64>,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and telemetry.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub peaks: Vec<usize>,
    pub frequencies: Option<Vec<f64>>,
    pub notes: Vec<String>,
}

/// Common error type for the core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
    #[error("zone is closed; clear it or re-enable edit mode first")]
    ZoneClosed,
    #[error("buffer exhaustion: {0}")]
    BufferExhaustion(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        CoreError::InvalidArgument(message.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Trait describing object-oriented signal-processing stages.
pub trait ProcessingStage {
    fn initialize(&mut self, config: &StageConfig) -> CoreResult<()>;
    fn execute(&mut self, input: StageInput) -> CoreResult<StageOutput>;
    fn cleanup(&mut self);
}
