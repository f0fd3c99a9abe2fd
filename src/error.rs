use thiserror::Error;

/// Everything that can go wrong between a raw log line and a vibration
/// series. All of these are fatal for the current run; the pipeline never
/// downgrades one to a default value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoadQaError {
    #[error("line {line}: unrecognized sensor kind {tag:?}")]
    UnrecognizedSensorKind { line: usize, tag: String },

    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("insufficient overlap between sensor streams: {0}")]
    InsufficientOverlap(String),

    #[error("interpolation domain violated: {0}")]
    InterpolationDomain(String),

    #[error("cannot extrapolate: target {target_ms} ms outside native range [{min_ms}, {max_ms}] ms")]
    Extrapolation {
        target_ms: u64,
        min_ms: u64,
        max_ms: u64,
    },

    #[error("degenerate signal: {0}")]
    DegenerateSignal(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, RoadQaError>;
