use std::f64::consts::PI;

/// Linear chirp sweeping from `start` to `end` cycles-per-window.
pub fn chirp(length: usize, start: f64, end: f64) -> Vec<f64> {
    (0..length)
        .map(|i| {
            let t = i as f64 / length as f64;
            (2.0 * PI * (start * t + (end - start) * t * t / 2.0)).sin()
        })
        .collect()
}

/// Time-reversed copy of `template`; the core filter convolves without
/// reversing, so this turns it into a correlator for `template`.
pub fn matched_kernel(template: &[f64]) -> Vec<f64> {
    template.iter().rev().copied().collect()
}
