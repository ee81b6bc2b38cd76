use std::sync::Arc;
use std::time::{Duration, Instant};

use stepwise_core::{Outcome, StepName};

/// A single executed step. Appended by the engine
/// at step completion, whether it succeeded or errored; never mutated
/// afterward.
#[derive(Debug, Clone)]
pub struct TestStepLog {
    step: StepName,
    started_at: Instant,
    duration: Duration,
    outcome: Outcome,
    error: Option<Arc<anyhow::Error>>,
}

impl TestStepLog {
    pub fn new(
        step: StepName,
        started_at: Instant,
        duration: Duration,
        outcome: Outcome,
        error: Option<Arc<anyhow::Error>>,
    ) -> Self {
        Self {
            step,
            started_at,
            duration,
            outcome,
            error,
        }
    }

    pub fn step(&self) -> &StepName {
        &self.step
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn error(&self) -> Option<&anyhow::Error> {
        self.error.as_deref()
    }
}
