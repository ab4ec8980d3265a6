use crate::prelude::{CoreError, CoreResult};

/// Correlates `signal` against a reference `kernel` and returns a response
/// aligned to the signal's own time axis (`result.len() == signal.len()`).
///
/// Despite the name this is a full discrete convolution by direct summation:
/// the kernel is not reversed. Both inputs are placed at offset
/// `kernel.len() - 1` inside zero buffers of length `2 * (n + m - 1)`, the
/// buffers are convolved, and the window starting at `kernel.len() - 1` is
/// returned. Downstream detection depends on exactly this alignment, so do not
/// "fix" it into a textbook cross-correlation.
///
/// Runs in `O(n * m)`; intended for short kernels.
pub fn matched_filter(signal: &[f64], kernel: &[f64]) -> CoreResult<Vec<f64>> {
    if signal.is_empty() {
        return Err(CoreError::invalid("matched filter needs a non-empty signal"));
    }
    if kernel.is_empty() {
        return Err(CoreError::invalid("matched filter needs a non-empty kernel"));
    }

    let n = signal.len();
    let m = kernel.len();
    let offset = m - 1;
    let padded_len = 2 * (n + m - 1);

    let mut padded_signal = vec![0.0; padded_len];
    let mut padded_kernel = vec![0.0; padded_len];
    padded_signal[offset..offset + n].copy_from_slice(signal);
    padded_kernel[offset..offset + m].copy_from_slice(kernel);

    let kernel_end = offset + m;
    let response: Vec<f64> = (offset..offset + n)
        .map(|i| {
            // padded_signal is zero below `offset`, padded_kernel is zero at or past `kernel_end`.
            let first = offset.max((i + 1).saturating_sub(kernel_end));
            (first..=i)
                .map(|j| padded_signal[j] * padded_kernel[i - j])
                .sum::<f64>()
        })
        .collect();

    Ok(response)
}
