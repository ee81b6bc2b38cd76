use stepwise_core::AssertionFailure;

use crate::decision::Decision;
use crate::strategy::ErrorStrategy;

/// Whether `error`'s chain contains an [`AssertionFailure`] anywhere — used
/// by [`IgnoreAssertions`] and by the engine's `stop_test_on_exception`
/// override (which needs to tell "assertion" and "non-assertion" errors
/// apart the same way).
pub fn is_assertion_failure(error: &anyhow::Error) -> bool {
    error
        .chain()
        .any(|cause| cause.downcast_ref::<AssertionFailure>().is_some())
}

/// Always propagates, at both levels.
pub struct AlwaysRaise;

impl ErrorStrategy for AlwaysRaise {
    fn on_test_error(&self, _error: &anyhow::Error, _count: usize) -> Decision {
        Decision::Propagate
    }

    fn on_suite_error(&self, _error: &anyhow::Error, _count: usize) -> Decision {
        Decision::Propagate
    }
}

/// Always absorbs, at both levels.
pub struct AlwaysIgnore;

impl ErrorStrategy for AlwaysIgnore {
    fn on_test_error(&self, _error: &anyhow::Error, _count: usize) -> Decision {
        Decision::Absorb
    }

    fn on_suite_error(&self, _error: &anyhow::Error, _count: usize) -> Decision {
        Decision::Absorb
    }
}

/// Absorbs assertion failures (any error whose chain contains
/// [`AssertionFailure`]); propagates everything else.
pub struct IgnoreAssertions;

impl ErrorStrategy for IgnoreAssertions {
    fn on_test_error(&self, error: &anyhow::Error, _count: usize) -> Decision {
        if is_assertion_failure(error) {
            Decision::Absorb
        } else {
            Decision::Propagate
        }
    }

    fn on_suite_error(&self, error: &anyhow::Error, _count: usize) -> Decision {
        if is_assertion_failure(error) {
            Decision::Absorb
        } else {
            Decision::Propagate
        }
    }
}

/// Absorbs while the observed error count in scope is `<= n`; the
/// `(n+1)`-th error propagates.
pub struct AllowCount {
    n: usize,
}

impl AllowCount {
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl ErrorStrategy for AllowCount {
    fn on_test_error(&self, _error: &anyhow::Error, count: usize) -> Decision {
        if count <= self.n {
            Decision::Absorb
        } else {
            Decision::Propagate
        }
    }

    fn on_suite_error(&self, _error: &anyhow::Error, count: usize) -> Decision {
        if count <= self.n {
            Decision::Absorb
        } else {
            Decision::Propagate
        }
    }
}
