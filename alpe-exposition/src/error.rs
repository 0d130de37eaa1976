use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ExpositionError {
    #[error("invalid metric name: {0:?}")]
    InvalidMetricName(String),

    #[error("invalid label name {label:?} on metric {metric}")]
    InvalidLabelName { metric: String, label: String },

    #[error("metric {0} was already added")]
    DuplicateGroup(String),

    #[error("non-numeric sample value {value:?} on metric {metric}")]
    NonNumericValue { metric: String, value: String },
}
