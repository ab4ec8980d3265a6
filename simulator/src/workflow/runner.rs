use crate::generator::profile::reference_chirp;
use crate::generator::template::matched_kernel;
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use scopecore::interface::ChannelFrame;
use scopecore::prelude::{ProcessingStage, StageConfig, StageInput};
use scopecore::processing::{CorrelationStage, ResampleStage, SpectrumStage};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResult {
    pub correlation: Vec<f64>,
    pub correlation_peaks: Vec<usize>,
    /// Echo start implied by the strongest correlation sample.
    pub estimated_delay: Option<usize>,
    pub display: Vec<f64>,
    pub spectrum: Vec<f64>,
    pub frequencies: Vec<f64>,
    pub spectrum_peaks: Vec<usize>,
    pub notes: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    stage_config: StageConfig,
}

impl Runner {
    pub fn new(config: &WorkflowConfig) -> Self {
        let kernel = matched_kernel(&reference_chirp(&config.generator));
        Self {
            stage_config: config.to_stage_config(kernel),
        }
    }

    pub fn execute(&self, frame: &ChannelFrame) -> anyhow::Result<WorkflowResult> {
        let stage_config = &self.stage_config;

        let mut correlation_stage = CorrelationStage::new();
        correlation_stage
            .initialize(stage_config)
            .context("initializing correlation stage")?;
        let correlation_output = correlation_stage
            .execute(StageInput::real(frame.signal_i.clone()))
            .context("executing correlation stage")?;
        correlation_stage.cleanup();

        let mut resample_stage = ResampleStage::new();
        resample_stage
            .initialize(stage_config)
            .context("initializing resample stage")?;
        let display_output = resample_stage
            .execute(StageInput::real(frame.signal_i.clone()))
            .context("executing resample stage")?;
        resample_stage.cleanup();

        let mut spectrum_stage = SpectrumStage::new(2);
        spectrum_stage
            .initialize(stage_config)
            .context("initializing spectrum stage")?;
        let spectrum_output = spectrum_stage
            .execute(StageInput {
                samples: frame.signal_i.clone(),
                quadrature: Some(frame.signal_q.clone()),
                timestamp: None,
            })
            .context("executing spectrum stage")?;
        spectrum_stage.cleanup();

        // The filter output is delayed by twice the kernel span.
        let lag = 2 * (stage_config.kernel.len() - 1);
        let estimated_delay = strongest(&correlation_output.samples)
            .and_then(|index| index.checked_sub(lag));

        let mut notes = correlation_output.metadata.notes;
        notes.extend(display_output.metadata.notes);
        notes.extend(spectrum_output.metadata.notes);

        Ok(WorkflowResult {
            correlation: correlation_output.samples,
            correlation_peaks: correlation_output.metadata.peaks,
            estimated_delay,
            display: display_output.samples,
            spectrum: spectrum_output.samples,
            frequencies: spectrum_output.metadata.frequencies.unwrap_or_default(),
            spectrum_peaks: spectrum_output.metadata.peaks,
            notes,
        })
    }
}

fn strongest(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_channel_frame, GeneratorConfig};
    use crate::workflow::config::GridConfig;

    #[test]
    fn runner_recovers_echo_delay() {
        let mut cfg = WorkflowConfig::from_args(128, 64, GridConfig::default());
        cfg.generator = GeneratorConfig {
            samples: 512,
            echo_delay: 200,
            noise: 0.0,
            carrier_amplitude: 0.05,
            ..Default::default()
        };
        let runner = Runner::new(&cfg);
        let frame = build_channel_frame(&cfg.generator).unwrap();
        let result = runner.execute(&frame).unwrap();

        assert_eq!(result.correlation.len(), 512);
        assert_eq!(result.display.len(), 128);
        assert_eq!(result.spectrum.len(), 64);
        assert_eq!(result.frequencies.len(), 64);
        assert_eq!(result.estimated_delay, Some(200));
    }
}
