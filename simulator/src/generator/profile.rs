use anyhow::{ensure, Context};
use rand::{rngs::StdRng, Rng, SeedableRng};
use scopecore::interface::ChannelFrame;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::generator::template::chirp;

/// Configuration for generating synthetic I/Q telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub samples: usize,
    /// Carrier cycles across the frame.
    pub frequency: f64,
    pub carrier_amplitude: f64,
    pub noise: f64,
    pub seed: u64,
    /// Length of the reference chirp.
    pub kernel_len: usize,
    pub chirp_start: f64,
    pub chirp_end: f64,
    /// Sample index at which the chirp echo begins.
    pub echo_delay: usize,
    pub echo_gain: f64,
    pub description: Option<String>,
    pub scenario: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples: 1024,
            frequency: 12.0,
            carrier_amplitude: 0.2,
            noise: 0.03,
            seed: 0,
            kernel_len: 32,
            chirp_start: 1.0,
            chirp_end: 8.0,
            echo_delay: 300,
            echo_gain: 1.0,
            description: None,
            scenario: None,
        }
    }
}

impl GeneratorConfig {
    /// One-line scenario label for run summaries, if a scenario is named.
    pub fn scenario_banner(&self) -> Option<String> {
        self.scenario.as_ref().map(|name| match self.description.as_deref() {
            Some(description) => format!("Scenario {}: {}", name, description),
            None => format!("Scenario {}", name),
        })
    }
}

/// Reference waveform the echo is built from.
pub fn reference_chirp(config: &GeneratorConfig) -> Vec<f64> {
    chirp(config.kernel_len.max(1), config.chirp_start, config.chirp_end)
}

fn carrier(config: &GeneratorConfig, index: usize, offset: f64) -> f64 {
    let phase = index as f64 / config.samples as f64 * 2.0 * PI * config.frequency + offset;
    config.carrier_amplitude * phase.sin()
}

fn jitter(rng: &mut StdRng, noise: f64) -> f64 {
    if noise > 0.0 {
        rng.gen_range(-noise..noise)
    } else {
        0.0
    }
}

/// Builds one channel: a carrier in I and Q (Q lagging by a quarter turn),
/// a scaled chirp echo in I at `echo_delay`, and seeded uniform noise.
pub fn build_channel_frame(config: &GeneratorConfig) -> anyhow::Result<ChannelFrame> {
    ensure!(config.samples > 0, "generator needs at least one sample");
    let echo = reference_chirp(config);
    let echo_end = config
        .echo_delay
        .checked_add(echo.len())
        .context("overflow placing echo in generated frame")?;
    ensure!(
        echo_end <= config.samples,
        "echo at {} (+{}) does not fit in {} samples",
        config.echo_delay,
        echo.len(),
        config.samples
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut signal_i = Vec::with_capacity(config.samples);
    let mut signal_q = Vec::with_capacity(config.samples);
    for index in 0..config.samples {
        let mut i = carrier(config, index, 0.0) + jitter(&mut rng, config.noise);
        if (config.echo_delay..echo_end).contains(&index) {
            i += config.echo_gain * echo[index - config.echo_delay];
        }
        let q = carrier(config, index, -PI / 2.0) + jitter(&mut rng, config.noise);
        signal_i.push(i);
        signal_q.push(q);
    }

    Ok(ChannelFrame::from_iq(signal_i, signal_q))
}
