use num_complex::Complex64;

use crate::math::fft::FftHelper;
use crate::math::stats::StatsHelper;
use crate::prelude::{
    CoreError, CoreResult, ProcessingStage, StageConfig, StageInput, StageMetadata, StageOutput,
};
use crate::processing::buffer_pool::BufferPool;
use crate::telemetry::log::LogManager;

/// Magnitude spectrum of an I/Q pair with a frequency axis and peak picks.
pub struct SpectrumStage {
    pool: BufferPool,
    config: Option<StageConfig>,
    fft: Option<FftHelper>,
    logger: LogManager,
}

impl SpectrumStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            config: None,
            fft: None,
            logger: LogManager::new("spectrum"),
        }
    }
}

impl ProcessingStage for SpectrumStage {
    fn initialize(&mut self, config: &StageConfig) -> CoreResult<()> {
        if config.spectrum_bins == 0 {
            return Err(CoreError::invalid("spectrum needs at least one bin"));
        }
        self.config = Some(config.clone());
        self.fft = Some(FftHelper::new(config.spectrum_bins));
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> CoreResult<StageOutput> {
        if input.samples.is_empty() {
            return Err(CoreError::invalid("no samples provided"));
        }
        let (config, fft) = match (self.config.as_ref(), self.fft.as_ref()) {
            (Some(config), Some(fft)) => (config, fft),
            _ => return Err(CoreError::Internal("FFT not configured".into())),
        };

        let quadrature = input.quadrature.as_deref().unwrap_or(&[]);
        if !quadrature.is_empty() && quadrature.len() != input.samples.len() {
            return Err(CoreError::invalid(format!(
                "I/Q length mismatch: {} vs {}",
                input.samples.len(),
                quadrature.len()
            )));
        }
        let iq: Vec<Complex64> = input
            .samples
            .iter()
            .enumerate()
            .map(|(n, &i)| Complex64::new(i, quadrature.get(n).copied().unwrap_or(0.0)))
            .collect();

        let mut notes = Vec::new();
        if iq.len() > fft.size() {
            let note = format!(
                "truncated {} samples to {} bins",
                iq.len(),
                fft.size()
            );
            self.logger.record(&note);
            notes.push(note);
        }
        let transformed = fft.forward(&iq);
        let mut magnitudes = self.pool.checkout(transformed.len())?;
        for (slot, bin) in magnitudes.iter_mut().zip(&transformed) {
            *slot = bin.norm();
        }

        let bins = fft.size() as f64;
        let frequencies = (0..fft.size())
            .map(|k| k as f64 * config.sample_rate / bins)
            .collect();
        let threshold = StatsHelper::rms(&magnitudes) * config.peak_factor;
        let peaks = StatsHelper::find_local_maxima(&magnitudes, threshold);
        self.logger.record(&format!(
            "{} bins, {} peaks above {:.4}",
            magnitudes.len(),
            peaks.len(),
            threshold
        ));
        notes.push(format!("spectrum threshold {:.4}", threshold));
        let samples = magnitudes.clone();
        self.pool.release(magnitudes);

        Ok(StageOutput {
            samples,
            metadata: StageMetadata {
                peaks,
                frequencies: Some(frequencies),
                notes,
            },
        })
    }

    fn cleanup(&mut self) {
        self.pool.reset();
        self.config = None;
        self.fft = None;
    }
}
