use crate::math::convolution::matched_filter;
use crate::math::stats::StatsHelper;
use crate::prelude::{
    CoreError, CoreResult, ProcessingStage, StageConfig, StageInput, StageMetadata, StageOutput,
};
use crate::telemetry::log::LogManager;

/// Matched-filter stage: correlates each frame against the configured kernel
/// and reports response peaks above `rms * peak_factor`.
pub struct CorrelationStage {
    config: Option<StageConfig>,
    logger: LogManager,
}

impl CorrelationStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("correlation"),
        }
    }
}

impl Default for CorrelationStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for CorrelationStage {
    fn initialize(&mut self, config: &StageConfig) -> CoreResult<()> {
        if config.kernel.is_empty() {
            return Err(CoreError::invalid("correlation kernel is empty"));
        }
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> CoreResult<StageOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| CoreError::Internal("stage not initialized".into()))?;

        let response = matched_filter(&input.samples, &config.kernel)?;
        let threshold = StatsHelper::rms(&response) * config.peak_factor;
        let peaks = StatsHelper::find_local_maxima(&response, threshold);
        self.logger.record(&format!(
            "{} samples, {} peaks above {:.4}",
            response.len(),
            peaks.len(),
            threshold
        ));

        let metadata = StageMetadata {
            notes: vec![format!("threshold {:.4}", threshold)],
            peaks,
            ..Default::default()
        };

        Ok(StageOutput {
            samples: response,
            metadata,
        })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}
