//! Two runs with identical seed, model,
//! and identical external side effects produce identical step sequences.
//! Verified across several seeds and all four selection algorithms.

use stepwise_algorithms::{Balancing, Random, SelectionAlgorithm, Weighted, WeightedBalancing};
use stepwise_conditions::Length;
use stepwise_engine::{Engine, EngineConfig};
use stepwise_tests_support::model::{triple_model, TripleCounterState};

fn run_once(seed: u64, algorithm: impl SelectionAlgorithm + 'static) -> Vec<String> {
    let model = triple_model().expect("model builds");
    let config = EngineConfig::new(Length::new(25).unwrap(), Length::new(3).unwrap())
        .with_seed(seed)
        .with_algorithm(algorithm)
        .build();
    let mut engine = Engine::new(model, config);
    let mut state = TripleCounterState::default();
    let history = engine.run(&mut state).expect("no errors in this model");
    history
        .tests()
        .iter()
        .flat_map(|t| t.steps())
        .map(|log| log.step().to_string())
        .collect()
}

#[test]
fn same_seed_same_algorithm_reproduces_step_sequence() {
    for seed in [1u64, 9, 333, 2024] {
        let first = run_once(seed, Random);
        let second = run_once(seed, Random);
        assert_eq!(first, second, "Random diverged for seed {seed}");

        let first = run_once(seed, Balancing);
        let second = run_once(seed, Balancing);
        assert_eq!(first, second, "Balancing diverged for seed {seed}");

        let first = run_once(seed, Weighted);
        let second = run_once(seed, Weighted);
        assert_eq!(first, second, "Weighted diverged for seed {seed}");

        let first = run_once(seed, WeightedBalancing);
        let second = run_once(seed, WeightedBalancing);
        assert_eq!(first, second, "WeightedBalancing diverged for seed {seed}");
    }
}

#[test]
fn different_seeds_usually_diverge() {
    // Not a hard guarantee for every possible pair, but with 25 steps over
    // 3 candidates it would be a striking coincidence for two different
    // seeds to land on the exact same sequence under Random selection.
    let a = run_once(1, Random);
    let b = run_once(2, Random);
    assert_ne!(a, b);
}
