//! `And(Length(5), StepCoverage(100, K=4))`
//! against a catalogue of four always-enabled steps. The test must end at
//! the earliest step index `i >= 5` at which all four steps have appeared,
//! and never before the fourth distinct step is seen.

use stepwise_algorithms::Random;
use stepwise_conditions::{And, Length, StepCoverage};
use stepwise_engine::{Engine, EngineConfig};
use stepwise_tests_support::model::{quad_model, QuadState};

#[test]
fn test_ends_no_earlier_than_full_coverage_and_never_before_length_five() {
    let model = quad_model().expect("model builds");
    let catalogue: Vec<_> = model.step_names();

    let condition = And::new(vec![
        Box::new(Length::new(5).unwrap()),
        Box::new(StepCoverage::new(100.0, catalogue).unwrap()),
    ]);
    let config = EngineConfig::new(condition, Length::new(1).unwrap())
        .with_seed(7)
        .with_algorithm(Random)
        .build();
    let mut engine = Engine::new(model, config);
    let mut state = QuadState::default();

    let history = engine.run(&mut state).expect("no errors in this model");

    assert_eq!(history.sealed_test_count(), 1);
    let test = &history.tests()[0];

    // Lower bound: at least 4 steps needed to see all 4, but the And also
    // requires >= 5.
    assert!(test.step_count() >= 5);

    // Every catalogued step appeared by the time the test ended.
    assert!(state.seen.iter().all(|&s| s));

    // The prefix one step short of the full log must not already satisfy
    // both sub-conditions, or the And() would have ended the test earlier.
    let distinct_before_last: std::collections::HashSet<_> = test
        .steps()
        .iter()
        .take(test.step_count() - 1)
        .map(|log| log.step().clone())
        .collect();
    assert!(
        distinct_before_last.len() < 4 || test.step_count() - 1 < 5,
        "And() should not have fired one step earlier"
    );
}
