use num_complex::Complex64;
use rustfft::{num_traits::Zero, Fft, FftPlanner};

/// Helper that wraps the `rustfft` planner for reuse.
pub struct FftHelper {
    fft: std::sync::Arc<dyn Fft<f64>>,
    size: usize,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward transform; the input is zero-padded or truncated to `size`.
    pub fn forward(&self, input: &[Complex64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input.iter().take(self.size).copied().collect();
        buffer.resize(self.size, Complex64::zero());
        self.fft.process(&mut buffer);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fft_helper_returns_same_length() {
        let helper = FftHelper::new(4);
        let input: Vec<Complex64> = [1.0, 0.0, -1.0, 0.0]
            .iter()
            .map(|&v| Complex64::new(v, 0.0))
            .collect();
        let output = helper.forward(&input);
        assert_eq!(output.len(), 4);
        assert!((output[1].norm() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn complex_tone_lands_in_one_bin() {
        let size = 8;
        let helper = FftHelper::new(size);
        let tone: Vec<Complex64> = (0..size)
            .map(|n| Complex64::from_polar(1.0, 2.0 * std::f64::consts::PI * n as f64 / size as f64))
            .collect();
        let magnitudes: Vec<f64> = helper.forward(&tone).iter().map(|c| c.norm()).collect();
        assert!((magnitudes[1] - size as f64).abs() < 1e-9);
        assert!(magnitudes[0] < 1e-9);
    }
}
