use thiserror::Error;

/// Errors shared across the stepwise crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A weight failed the "finite and strictly positive" invariant.
    #[error("invalid weight {value}: must be finite and > 0.0")]
    InvalidWeight { value: f64 },
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Marker error for assertion-style failures raised by step bodies.
///
/// `IgnoreAssertions` absorbs an error iff its underlying
/// `anyhow::Error` downcasts to this type. Step authors that want their
/// assertion helper to be recognized as "an assertion failure" rather than
/// a generic error should return `anyhow::Error::new(AssertionFailure(..))`
/// (or any error type that wraps one via `#[source]`/`#[from]`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("assertion failed: {0}")]
pub struct AssertionFailure(pub String);

impl AssertionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
