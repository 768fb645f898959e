use thiserror::Error;

/// Request-level failures surfaced to transport collaborators.
///
/// Every variant maps to a distinct external status; none of them should
/// ever take the process down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VizError {
    /// No usable rows remained after ingestion dropped incomplete ones.
    #[error("dataset has no usable rows")]
    EmptyInput,

    /// The query named a dataset id that was never created.
    #[error("dataset {0} not found")]
    DatasetNotFound(u64),

    /// The query referenced a field absent from the dataset, or violated a
    /// numeric constraint such as a non-positive top count.
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// An enumeration token outside its defined set. Rejected outright,
    /// never replaced with a default.
    #[error("invalid enum value: {0}")]
    InvalidEnum(String),
}
