use crate::decision::Decision;

/// A two-level error-handling policy.
///
/// The engine maintains the scoped error counters itself and passes the post-increment count — i.e. `count` is the
/// 1-indexed ordinal of *this* error within its scope — so `AllowCount`
/// doesn't need to see `History` to know which error it's looking at.
pub trait ErrorStrategy: Send + Sync {
    /// Called after a step/hook/`NoAvailableSteps` error, before any
    /// suite-level strategy runs. `count` includes this error.
    fn on_test_error(&self, error: &anyhow::Error, count: usize) -> Decision;

    /// Called only if `on_test_error` (or a propagated `after_test` error)
    /// decided `Propagate`. `count` includes this error.
    fn on_suite_error(&self, error: &anyhow::Error, count: usize) -> Decision;
}
