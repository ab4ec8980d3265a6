pub mod buffer_pool;
pub mod correlation;
pub mod resample;
pub mod spectrum;

pub use buffer_pool::BufferPool;
pub use correlation::CorrelationStage;
pub use resample::ResampleStage;
pub use spectrum::SpectrumStage;
