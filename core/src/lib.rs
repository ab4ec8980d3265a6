//! Numerical and geometric core of the sensor telemetry dashboard.
//!
//! Three independent pieces live here: a direct-summation matched filter,
//! a natural-cubic-spline resampler for fitting sample arrays to a display
//! width, and a grid-quantized polygon editor for operator-drawn zones.
//! The `processing` stages wrap the numeric routines so a driver can chain
//! them the same way for every telemetry frame.

pub mod interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;
pub mod zone;

pub use prelude::{CoreError, CoreResult, ProcessingStage, StageInput, StageOutput};
