use thiserror::Error;

/// Errors a selection algorithm can surface while scoring enabled steps
/// (e.g. a computed weight violating the finite-and-positive invariant at
/// call time). Distinct from "empty candidate set", which the engine is
/// never allowed to present to `choose` in the first place.
#[derive(Debug, Error)]
pub enum AlgorithmError {
    #[error("step {step} produced invalid weight {value}: must be finite and > 0.0")]
    InvalidWeight { step: String, value: f64 },
}

pub type AlgorithmResult<T> = Result<T, AlgorithmError>;
