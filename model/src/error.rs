use stepwise_core::StepName;
use thiserror::Error;

/// Model structure errors — always fatal, always
/// detected before any suite hook runs.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The same step name was registered twice (directly, or across the
    /// constituents of a composite model).
    #[error("duplicate step name: {0}")]
    DuplicateStep(StepName),

    /// A `guard_for`/`weight_for` declaration named a step that doesn't
    /// exist in the catalogue.
    #[error("guard or weight declared for unknown step: {0}")]
    UnknownGuardTarget(StepName),

    /// A constant weight failed the finite-and-positive invariant.
    #[error("step {step} has invalid weight {value}: must be finite and > 0.0")]
    InvalidWeight { step: StepName, value: f64 },

    /// The model's catalogue is empty after resolution.
    #[error("model has no steps")]
    NoSteps,
}

pub type ModelResult<T> = Result<T, ModelError>;
