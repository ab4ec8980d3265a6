use crate::math::resample::resample_data;
use crate::prelude::{
    CoreError, CoreResult, ProcessingStage, StageConfig, StageInput, StageMetadata, StageOutput,
};
use crate::telemetry::log::LogManager;

/// Display-conditioning stage that fits a frame to the configured width.
pub struct ResampleStage {
    target_width: Option<usize>,
    logger: LogManager,
}

impl ResampleStage {
    pub fn new() -> Self {
        Self {
            target_width: None,
            logger: LogManager::new("resample"),
        }
    }
}

impl Default for ResampleStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for ResampleStage {
    fn initialize(&mut self, config: &StageConfig) -> CoreResult<()> {
        if config.target_width == 0 {
            return Err(CoreError::invalid("target width must be at least 1"));
        }
        self.target_width = Some(config.target_width);
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> CoreResult<StageOutput> {
        let target_width = self
            .target_width
            .ok_or_else(|| CoreError::Internal("stage not initialized".into()))?;

        let source_width = input.samples.len();
        let samples = resample_data(&input.samples, target_width)?;
        self.logger
            .record(&format!("{} -> {} samples", source_width, samples.len()));

        Ok(StageOutput {
            samples,
            metadata: StageMetadata {
                notes: vec![format!("resampled {} to {}", source_width, target_width)],
                ..Default::default()
            },
        })
    }

    fn cleanup(&mut self) {
        self.target_width = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resample_stage_shrinks_to_width() {
        let mut stage = ResampleStage::new();
        let config = StageConfig {
            target_width: 4,
            ..Default::default()
        };
        stage.initialize(&config).unwrap();

        let output = stage
            .execute(StageInput::real((0..16).map(|v| v as f64).collect()))
            .unwrap();
        assert_eq!(output.samples, vec![1.5, 5.5, 9.5, 13.5]);
        stage.cleanup();
    }

    #[test]
    fn zero_width_config_is_rejected() {
        let mut stage = ResampleStage::new();
        let config = StageConfig {
            target_width: 0,
            ..Default::default()
        };
        assert!(stage.initialize(&config).is_err());
    }
}
