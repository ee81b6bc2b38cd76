use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use stepwise_core::{StepName, Weight};
use stepwise_history::History;

use crate::algorithm::SelectionAlgorithm;
use crate::candidate::Candidate;
use crate::error::{AlgorithmError, AlgorithmResult};

/// Selection proportional to each step's weight, evaluated fresh on every
/// call.
pub struct Weighted;

impl SelectionAlgorithm for Weighted {
    fn choose<'a>(
        &self,
        candidates: &[Candidate<'a>],
        _history: &History,
        rng: &mut StdRng,
    ) -> AlgorithmResult<&'a StepName> {
        let mut weights = Vec::with_capacity(candidates.len());
        for c in candidates {
            let validated =
                Weight::new(c.weight).map_err(|_| AlgorithmError::InvalidWeight {
                    step: c.name.to_string(),
                    value: c.weight,
                })?;
            weights.push(validated.get());
        }
        let dist = WeightedIndex::new(&weights).expect("at least one positive weight");
        let idx = dist.sample(rng);
        Ok(candidates[idx].name)
    }
}
