use rand::rngs::StdRng;
use stepwise_core::StepName;
use stepwise_history::History;

use crate::candidate::Candidate;
use crate::error::AlgorithmResult;

/// `choose(enabled_steps, history) -> step`.
///
/// Precondition: `candidates` is non-empty. The engine never calls `choose`
/// with an empty set — it raises `NoAvailableSteps` instead — so implementations may assume at least one candidate.
///
/// The `rng` is owned by the engine and borrowed for exactly one call;
/// algorithms must not retain it beyond that call, enforced here by the
/// borrow's lifetime rather than by convention.
pub trait SelectionAlgorithm: Send + Sync {
    fn choose<'a>(
        &self,
        candidates: &[Candidate<'a>],
        history: &History,
        rng: &mut StdRng,
    ) -> AlgorithmResult<&'a StepName>;
}
