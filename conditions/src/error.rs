use thiserror::Error;

/// Configuration errors for end conditions — fatal at engine
/// construction, before any suite hook runs.
#[derive(Debug, Error)]
pub enum ConditionError {
    /// `StepCoverage`'s percentage target was outside `[1, 100]`.
    #[error("invalid coverage target {percentage}: must be in [1, 100]")]
    InvalidCoverageTarget { percentage: f64 },

    /// `Length`'s step/test count target was not strictly positive.
    #[error("invalid length {n}: must be >= 1")]
    InvalidLength { n: usize },
}

pub type ConditionResult<T> = Result<T, ConditionError>;
