pub mod convolution;
pub mod fft;
pub mod resample;
pub mod scalar;
pub mod spline;
pub mod stats;

pub use convolution::matched_filter;
pub use fft::FftHelper;
pub use resample::resample_data;
pub use spline::{cubic_spline_interpolation, ControlPoint, NaturalCubicSpline};
pub use stats::StatsHelper;
