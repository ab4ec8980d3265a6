use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::prelude::{CoreError, CoreResult};

/// Sample position fed to (and emitted by) the spline fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
}

impl ControlPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One cubic piece `y0 + b*t + c*t^2 + d*t^3` over `t in [0, width)`.
#[derive(Debug, Clone, Copy)]
struct SplineSegment {
    x0: f64,
    y0: f64,
    width: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl SplineSegment {
    fn eval(&self, t: f64) -> f64 {
        self.y0 + self.b * t + self.c * t * t + self.d * t * t * t
    }
}

/// Natural cubic spline (zero second derivative at both ends) through a
/// strictly increasing set of control points.
#[derive(Debug, Clone)]
pub struct NaturalCubicSpline {
    segments: Vec<SplineSegment>,
    last: ControlPoint,
}

impl NaturalCubicSpline {
    /// Solves the natural-spline tridiagonal system and back-substitutes
    /// `b[i] = dy/h - h * (c[i+1] + 2c[i]) / 3` and `d[i] = (c[i+1] - c[i]) / 3h`.
    ///
    /// The dashboard's plotting code swapped `c[i]` and `c[i+1]` in both
    /// terms. Knot values are identical either way, but values between knots
    /// differ from those plots; this form keeps first and second derivatives
    /// continuous across segments.
    pub fn fit(points: &[ControlPoint]) -> CoreResult<Self> {
        let n = points.len();
        if n < 2 {
            return Err(CoreError::invalid(format!(
                "spline fit needs at least 2 control points, got {}",
                n
            )));
        }

        let x: Array1<f64> = points.iter().map(|p| p.x).collect();
        let y: Array1<f64> = points.iter().map(|p| p.y).collect();
        let h: Array1<f64> = (0..n - 1).map(|i| x[i + 1] - x[i]).collect();
        if let Some(i) = h.iter().position(|&w| !(w > 0.0) || !w.is_finite()) {
            return Err(CoreError::invalid(format!(
                "control points must be strictly increasing in x (segment {})",
                i
            )));
        }

        // Tridiagonal system for the second-order coefficients.
        let mut alpha = Array1::<f64>::zeros(n);
        for i in 1..n - 1 {
            alpha[i] = (3.0 / h[i]) * (y[i + 1] - y[i]) - (3.0 / h[i - 1]) * (y[i] - y[i - 1]);
        }

        let mut l = Array1::<f64>::ones(n);
        let mut mu = Array1::<f64>::zeros(n);
        let mut z = Array1::<f64>::zeros(n);
        for i in 1..n - 1 {
            l[i] = 2.0 * (x[i + 1] - x[i - 1]) - h[i - 1] * mu[i - 1];
            mu[i] = h[i] / l[i];
            z[i] = (alpha[i] - h[i - 1] * z[i - 1]) / l[i];
        }

        let mut c = Array1::<f64>::zeros(n);
        let mut b = Array1::<f64>::zeros(n - 1);
        let mut d = Array1::<f64>::zeros(n - 1);
        for i in (0..n - 1).rev() {
            c[i] = z[i] - mu[i] * c[i + 1];
            b[i] = (y[i + 1] - y[i]) / h[i] - h[i] * (c[i + 1] + 2.0 * c[i]) / 3.0;
            d[i] = (c[i + 1] - c[i]) / (3.0 * h[i]);
        }

        let segments = (0..n - 1)
            .map(|i| SplineSegment {
                x0: x[i],
                y0: y[i],
                width: h[i],
                b: b[i],
                c: c[i],
                d: d[i],
            })
            .collect();

        Ok(Self {
            segments,
            last: points[n - 1],
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Evaluates the spline at `x`, clamping to the fitted range.
    pub fn value_at(&self, x: f64) -> f64 {
        if x >= self.last.x {
            return self.last.y;
        }
        let index = self
            .segments
            .iter()
            .rposition(|segment| segment.x0 <= x)
            .unwrap_or(0);
        let segment = &self.segments[index];
        segment.eval((x - segment.x0).max(0.0))
    }

    /// Walks every segment in `resolution` equal steps of `width / resolution`,
    /// stopping before the segment end, then appends the last control point.
    ///
    /// `resolution` is a real number: a segment emits one pair for every
    /// whole `j` with `j < resolution`, so a fractional value rounds the
    /// per-segment count up.
    pub fn sample(&self, resolution: f64) -> CoreResult<Vec<ControlPoint>> {
        if !(resolution > 0.0) || !resolution.is_finite() {
            return Err(CoreError::invalid(format!(
                "spline resolution must be positive and finite, got {}",
                resolution
            )));
        }

        let per_segment = resolution.ceil() as usize;
        let mut output = Vec::with_capacity(self.segments.len() * per_segment + 1);
        for segment in &self.segments {
            let step = segment.width / resolution;
            let mut j = 0.0;
            while j < resolution {
                let t = j * step;
                output.push(ControlPoint::new(segment.x0 + t, segment.eval(t)));
                j += 1.0;
            }
        }
        output.push(self.last);
        Ok(output)
    }
}

/// Fits a natural cubic spline through `points` and samples it at
/// `resolution` steps per segment.
pub fn cubic_spline_interpolation(
    points: &[ControlPoint],
    resolution: f64,
) -> CoreResult<Vec<ControlPoint>> {
    NaturalCubicSpline::fit(points)?.sample(resolution)
}
