use std::sync::Arc;

use stepwise_conditions::ConditionError;
use stepwise_core::StepName;
use stepwise_model::ModelError;
use thiserror::Error;

/// The top-level failure a suite run can surface: one variant per upstream
/// component, `#[from]` for the ones that are always fatal and never need
/// extra context, explicit fields for the ones the engine itself raises
/// mid-run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A step's action, pre-hook, post-hook, or guard evaluation returned
    /// an error that propagated all the way out.
    /// `underlying` is shared with the `TestStepLog` recorded for the same
    /// failure (where one exists), hence the `Arc`.
    #[error("step {step} failed in test {test}: {underlying}")]
    StepFailed {
        test: usize,
        step: StepName,
        underlying: Arc<anyhow::Error>,
    },

    /// A lifecycle hook (`before_suite`, `after_test`, etc.) failed and the
    /// failure propagated.
    #[error("hook {hook_name} failed: {underlying}")]
    HookFailed {
        hook_name: &'static str,
        #[source]
        underlying: anyhow::Error,
    },

    /// Every step's guard evaluated false simultaneously; this propagated rather than being
    /// absorbed.
    #[error("no available steps in test {test}")]
    NoAvailableSteps { test: usize },

    /// Model construction failed: always fatal, always
    /// detected before any suite hook runs.
    #[error("model structure error: {0}")]
    ModelStructure(#[from] ModelError),

    /// End-condition construction failed: fatal at engine
    /// construction.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConditionError),

    /// An external interrupt was observed; never absorbed by any error
    /// strategy.
    #[error("run interrupted")]
    Interrupted,
}

pub type EngineResult<T> = Result<T, EngineError>;
