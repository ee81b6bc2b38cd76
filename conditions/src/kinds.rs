use stepwise_core::StepName;
use stepwise_history::{coverage_percentage, History};

use crate::context::EvalContext;
use crate::end_condition::EndCondition;
use crate::error::{ConditionError, ConditionResult};

/// True once the scope (current test, or whole suite) has accumulated `n`
/// steps/tests.
pub struct Length {
    n: usize,
}

impl Length {
    pub fn new(n: usize) -> ConditionResult<Self> {
        if n == 0 {
            return Err(ConditionError::InvalidLength { n });
        }
        Ok(Self { n })
    }
}

impl EndCondition for Length {
    fn end_test(&self, history: &History, _ctx: &EvalContext) -> bool {
        history
            .current_test()
            .is_some_and(|t| t.step_count() >= self.n)
    }

    fn end_suite(&self, history: &History, _ctx: &EvalContext) -> bool {
        history.sealed_test_count() >= self.n
    }
}

/// True once the scope's wall-clock duration has reached `duration`.
pub struct Time {
    duration: std::time::Duration,
}

impl Time {
    pub fn new(duration: std::time::Duration) -> Self {
        Self { duration }
    }
}

impl EndCondition for Time {
    fn end_test(&self, history: &History, ctx: &EvalContext) -> bool {
        history
            .current_test()
            .is_some_and(|t| t.elapsed(ctx.now) >= self.duration)
    }

    fn end_suite(&self, _history: &History, ctx: &EvalContext) -> bool {
        ctx.now.duration_since(ctx.suite_started_at) >= self.duration
    }
}

/// True once `coverage_percentage(catalogue) >= percentage`. The test-level
/// variant considers only the current test's unique steps; the suite-level
/// variant considers cumulative coverage across the whole suite.
pub struct StepCoverage {
    percentage: f64,
    catalogue: Vec<StepName>,
}

impl StepCoverage {
    pub fn new(percentage: f64, catalogue: Vec<StepName>) -> ConditionResult<Self> {
        if !(1.0..=100.0).contains(&percentage) {
            return Err(ConditionError::InvalidCoverageTarget { percentage });
        }
        Ok(Self {
            percentage,
            catalogue,
        })
    }
}

impl EndCondition for StepCoverage {
    fn end_test(&self, history: &History, _ctx: &EvalContext) -> bool {
        match history.current_test() {
            Some(test) => {
                coverage_percentage(test.unique_steps().into_iter(), &self.catalogue)
                    >= self.percentage
            }
            None => false,
        }
    }

    fn end_suite(&self, history: &History, _ctx: &EvalContext) -> bool {
        history.coverage_percentage(&self.catalogue) >= self.percentage
    }
}

/// Always false at both levels; used only for open-ended online runs that
/// must be manually interrupted.
pub struct Endless;

impl EndCondition for Endless {
    fn end_test(&self, _history: &History, _ctx: &EvalContext) -> bool {
        false
    }

    fn end_suite(&self, _history: &History, _ctx: &EvalContext) -> bool {
        false
    }
}

/// Conjunction: true at a level iff every sub-condition is true at that
/// level.
pub struct And(Vec<Box<dyn EndCondition>>);

impl And {
    pub fn new(conditions: Vec<Box<dyn EndCondition>>) -> Self {
        Self(conditions)
    }
}

impl EndCondition for And {
    fn end_test(&self, history: &History, ctx: &EvalContext) -> bool {
        !self.0.is_empty() && self.0.iter().all(|c| c.end_test(history, ctx))
    }

    fn end_suite(&self, history: &History, ctx: &EvalContext) -> bool {
        !self.0.is_empty() && self.0.iter().all(|c| c.end_suite(history, ctx))
    }
}

/// Disjunction: true at a level iff any sub-condition is true at that
/// level.
pub struct Or(Vec<Box<dyn EndCondition>>);

impl Or {
    pub fn new(conditions: Vec<Box<dyn EndCondition>>) -> Self {
        Self(conditions)
    }
}

impl EndCondition for Or {
    fn end_test(&self, history: &History, ctx: &EvalContext) -> bool {
        self.0.iter().any(|c| c.end_test(history, ctx))
    }

    fn end_suite(&self, history: &History, ctx: &EvalContext) -> bool {
        self.0.iter().any(|c| c.end_suite(history, ctx))
    }
}
