//! Three always-enabled steps under `Balancing`, run for exactly 30 steps in a
//! single test. Final counts must satisfy `max - min <= 1`.

use stepwise_algorithms::Balancing;
use stepwise_conditions::Length;
use stepwise_engine::{Engine, EngineConfig};
use stepwise_tests_support::model::{triple_model, TripleCounterState};

#[test]
fn balancing_keeps_counts_within_one_of_each_other() {
    // GIVEN three always-enabled steps and Balancing
    let model = triple_model().expect("model builds");
    let config = EngineConfig::new(Length::new(30).unwrap(), Length::new(1).unwrap())
        .with_seed(42)
        .with_algorithm(Balancing)
        .build();
    let mut engine = Engine::new(model, config);
    let mut state = TripleCounterState::default();

    // WHEN 30 steps run in one test
    let history = engine.run(&mut state).expect("no errors in this model");

    // THEN the suite executed exactly 30 steps across the catalogue of 3
    assert_eq!(history.total_steps(), 30);
    let counts = [state.a, state.b, state.c];
    let max = *counts.iter().max().unwrap();
    let min = *counts.iter().min().unwrap();
    assert!(
        max - min <= 1,
        "expected near-even counts, got {counts:?}"
    );
}

#[test]
fn balancing_fairness_holds_across_several_seeds() {
    // GIVEN the same model run under several different seeds
    for seed in [1u64, 2, 3, 17, 99] {
        let model = triple_model().expect("model builds");
        let config = EngineConfig::new(Length::new(30).unwrap(), Length::new(1).unwrap())
            .with_seed(seed)
            .with_algorithm(Balancing)
            .build();
        let mut engine = Engine::new(model, config);
        let mut state = TripleCounterState::default();

        // WHEN the suite runs to completion
        engine.run(&mut state).expect("no errors in this model");

        // THEN fairness holds regardless of seed
        let counts = [state.a, state.b, state.c];
        let max = *counts.iter().max().unwrap();
        let min = *counts.iter().min().unwrap();
        assert!(max - min <= 1, "seed {seed}: counts {counts:?}");
    }
}
