pub mod builder;
pub mod error;
pub mod sample;
mod validate;

pub use builder::MetricsDocumentBuilder;
pub use error::ExpositionError;
pub use sample::{LabelSet, Sample, SampleValue};

/// Content type of the rendered document (Prometheus text format 0.0.4).
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
