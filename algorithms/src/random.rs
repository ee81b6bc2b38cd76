use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use stepwise_core::StepName;
use stepwise_history::History;

use crate::algorithm::SelectionAlgorithm;
use crate::candidate::Candidate;
use crate::error::AlgorithmResult;

/// Uniform selection among enabled steps, ignoring weights and history.
pub struct Random;

impl SelectionAlgorithm for Random {
    fn choose<'a>(
        &self,
        candidates: &[Candidate<'a>],
        _history: &History,
        rng: &mut StdRng,
    ) -> AlgorithmResult<&'a StepName> {
        let choice = candidates
            .choose(rng)
            .expect("engine never calls choose with an empty candidate set");
        Ok(choice.name)
    }
}
