use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use stepwise_core::StepName;
use stepwise_history::History;

use crate::algorithm::SelectionAlgorithm;
use crate::candidate::Candidate;
use crate::error::AlgorithmResult;

/// Deterministic selection of the step with the minimum execution count in
/// history, ties broken uniformly at random.
pub struct Balancing;

impl SelectionAlgorithm for Balancing {
    fn choose<'a>(
        &self,
        candidates: &[Candidate<'a>],
        history: &History,
        rng: &mut StdRng,
    ) -> AlgorithmResult<&'a StepName> {
        let frequency = history.step_frequency();
        let min_count = candidates
            .iter()
            .map(|c| frequency.get(c.name).copied().unwrap_or(0))
            .min()
            .expect("engine never calls choose with an empty candidate set");

        let least_run: Vec<&Candidate<'a>> = candidates
            .iter()
            .filter(|c| frequency.get(c.name).copied().unwrap_or(0) == min_count)
            .collect();

        let choice = least_run
            .choose(rng)
            .expect("at least one candidate matches the minimum count");
        Ok(choice.name)
    }
}
