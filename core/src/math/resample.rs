use crate::math::spline::{cubic_spline_interpolation, ControlPoint};
use crate::math::stats::StatsHelper;
use crate::prelude::{CoreError, CoreResult};

/// Fits `data` to `target_width` display columns.
///
/// Shrinking averages contiguous bins; growing samples a natural cubic spline
/// at `target_width / data.len()` steps per sample; an equal width copies the
/// input. Growth follows the spline stepping rule, so the grown output holds
/// `(len - 1) * ceil(target_width / len) + 1` values rather than exactly
/// `target_width`.
pub fn resample_data(data: &[f64], target_width: usize) -> CoreResult<Vec<f64>> {
    if target_width == 0 {
        return Err(CoreError::invalid("target width must be at least 1"));
    }
    if data.is_empty() {
        return Err(CoreError::invalid("cannot resample an empty series"));
    }

    let current_width = data.len();
    if target_width < current_width {
        return Ok(downsample(data, target_width));
    }
    if target_width > current_width {
        let points: Vec<ControlPoint> = data
            .iter()
            .enumerate()
            .map(|(i, &value)| ControlPoint::new(i as f64, value))
            .collect();
        let resolution = target_width as f64 / current_width as f64;
        let interpolated = cubic_spline_interpolation(&points, resolution)?;
        return Ok(interpolated.into_iter().map(|point| point.y).collect());
    }

    Ok(data.to_vec())
}

/// Half-open bin bounds `floor(i * len / width) .. floor((i + 1) * len / width)`.
///
/// Integer arithmetic keeps the last bound exactly at `len`; widths differ by
/// at most one element.
pub fn bin_bounds(len: usize, width: usize, index: usize) -> (usize, usize) {
    (index * len / width, (index + 1) * len / width)
}

fn downsample(data: &[f64], target_width: usize) -> Vec<f64> {
    (0..target_width)
        .map(|i| {
            let (start, end) = bin_bounds(data.len(), target_width, i);
            StatsHelper::mean(&data[start..end]).unwrap_or(0.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_width_returns_input_values() {
        let data = [1.0, -2.0, 3.5];
        assert_eq!(resample_data(&data, 3).unwrap(), data.to_vec());
    }

    #[test]
    fn downsample_averages_bins() {
        let data: Vec<f64> = (0..10).map(|v| v as f64).collect();
        let output = resample_data(&data, 3).unwrap();
        assert_eq!(output.len(), 3);

        let mut covered = 0;
        for (i, value) in output.iter().enumerate() {
            let (start, end) = bin_bounds(data.len(), 3, i);
            covered += end - start;
            let expected = data[start..end].iter().sum::<f64>() / (end - start) as f64;
            assert!((value - expected).abs() < 1e-12);
        }
        assert_eq!(covered, data.len());
        // bins: [0,1,2] [3,4,5] [6,7,8,9]
        assert_eq!(output, vec![1.0, 4.0, 7.5]);
    }

    #[test]
    fn upsample_goes_through_samples() {
        let data = [0.0, 2.0, 1.0, 3.0];
        let output = resample_data(&data, 8).unwrap();
        assert_eq!(output.len(), 3 * 2 + 1);
        for (i, &value) in data.iter().enumerate() {
            assert!((output[i * 2] - value).abs() < 1e-9);
        }
    }

    #[test]
    fn invalid_requests_are_rejected() {
        assert!(resample_data(&[1.0, 2.0], 0).is_err());
        assert!(resample_data(&[], 4).is_err());
        // a single sample cannot seed a spline
        assert!(resample_data(&[1.0], 4).is_err());
    }
}
