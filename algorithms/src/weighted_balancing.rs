use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use stepwise_core::{StepName, Weight};
use stepwise_history::History;

use crate::algorithm::SelectionAlgorithm;
use crate::candidate::Candidate;
use crate::error::{AlgorithmError, AlgorithmResult};

/// The small positive shift added to rescued scores so none is exactly
/// zero, keeping `WeightedIndex` (which requires at least one weight
/// `> 0`) well-defined even if the minimum rescued score would otherwise
/// land on zero.
const RESCUE_EPSILON: f64 = 1e-9;

/// Combines weights with history-based balancing.
///
/// For each candidate: normalized weight = weight / sum(weights);
/// normalized count = count / suite_total_steps (0 if the suite hasn't run
/// any steps yet); score = normalized weight - normalized count. If any
/// score is <= 0, every score is shifted by `|min_score| + epsilon` so all
/// scores become strictly positive before the weighted draw.
pub struct WeightedBalancing;

impl SelectionAlgorithm for WeightedBalancing {
    fn choose<'a>(
        &self,
        candidates: &[Candidate<'a>],
        history: &History,
        rng: &mut StdRng,
    ) -> AlgorithmResult<&'a StepName> {
        let mut raw_weights = Vec::with_capacity(candidates.len());
        for c in candidates {
            let validated =
                Weight::new(c.weight).map_err(|_| AlgorithmError::InvalidWeight {
                    step: c.name.to_string(),
                    value: c.weight,
                })?;
            raw_weights.push(validated.get());
        }
        let weight_sum: f64 = raw_weights.iter().sum();

        let frequency = history.step_frequency();
        let suite_total = history.total_steps();
        let counts: Vec<usize> = candidates
            .iter()
            .map(|c| frequency.get(c.name).copied().unwrap_or(0))
            .collect();

        let mut scores: Vec<f64> = raw_weights
            .iter()
            .zip(counts.iter())
            .map(|(weight, count)| {
                let norm_weight = weight / weight_sum;
                let norm_count = if suite_total == 0 {
                    0.0
                } else {
                    *count as f64 / suite_total as f64
                };
                norm_weight - norm_count
            })
            .collect();

        let min_score = scores.iter().cloned().fold(f64::INFINITY, f64::min);
        if min_score <= 0.0 {
            let shift = min_score.abs() + RESCUE_EPSILON;
            for score in scores.iter_mut() {
                *score += shift;
            }
        }
        debug_assert!(scores.iter().all(|s| *s > 0.0));

        let dist = WeightedIndex::new(&scores).expect("rescue guarantees all scores are > 0");
        let idx = dist.sample(rng);
        Ok(candidates[idx].name)
    }
}
