use std::time::Instant;

/// Timing context an [`crate::EndCondition`] needs beyond `History` itself:
/// `History` tracks per-test timestamps, but not when the suite (as a
/// whole) started, so the engine threads that through here.
///
/// Suite-level `Time` measures from the start of the SUITE phase (just
/// before the first `before_suite` call), not from engine construction.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext {
    pub now: Instant,
    pub suite_started_at: Instant,
}
