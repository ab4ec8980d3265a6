/// Linearly remaps `value` from `[low1, high1]` onto `[low2, high2]`.
pub fn map_range(value: f64, low1: f64, high1: f64, low2: f64, high2: f64) -> f64 {
    low2 + (high2 - low2) * (value - low1) / (high1 - low1)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// Human-readable frequency label with two decimals, e.g. `2.50 kHz`.
pub fn format_frequency(hz: f64) -> String {
    let mut value = hz;
    let mut unit = "Hz";
    for next in ["kHz", "MHz", "GHz"] {
        if value < 1000.0 {
            break;
        }
        value /= 1000.0;
        unit = next;
    }
    format!("{:.2} {}", value, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_and_lerp() {
        assert_eq!(map_range(5.0, 0.0, 10.0, 100.0, 200.0), 150.0);
        assert_eq!(map_range(0.0, -1.0, 1.0, 0.0, 1.0), 0.5);
        assert_eq!(lerp(2.0, 4.0, 0.25), 2.5);
    }

    #[test]
    fn frequency_labels_scale_units() {
        assert_eq!(format_frequency(440.0), "440.00 Hz");
        assert_eq!(format_frequency(2500.0), "2.50 kHz");
        assert_eq!(format_frequency(80_000_000.0), "80.00 MHz");
        assert_eq!(format_frequency(2.4e12), "2400.00 GHz");
    }
}
