//! `stop_on_fail` forces suite termination on any propagated
//! test-level error regardless of the suite strategy's decision, and
//! `stop_test_on_exception` ends the current test on a non-assertion error
//! even when the test strategy would otherwise absorb it.

use stepwise_conditions::Length;
use stepwise_engine::{Engine, EngineConfig, EngineError};
use stepwise_strategies::{AllowCount, AlwaysIgnore};
use stepwise_tests_support::model::{failing_model, UnitState};

#[test]
fn stop_on_fail_overrides_an_absorbing_suite_strategy() {
    // GIVEN a suite strategy that would otherwise absorb every error
    let model = failing_model().expect("model builds");
    let config = EngineConfig::new(Length::new(10).unwrap(), Length::new(3).unwrap())
        .with_test_error_strategy(AllowCount::new(1))
        .with_suite_error_strategy(AlwaysIgnore)
        .with_stop_on_fail(true)
        .build();
    let mut engine = Engine::new(model, config);
    let mut state = UnitState;

    // WHEN the suite runs
    let result = engine.run(&mut state);

    // THEN it still terminates on the first propagated test-level error,
    // well short of the configured 3 tests.
    assert!(matches!(result, Err(EngineError::StepFailed { .. })));
}

#[test]
fn stop_test_on_exception_ends_the_test_despite_an_absorbing_strategy() {
    // GIVEN a test strategy that absorbs everything, but
    // stop_test_on_exception set — the failing step here is not an
    // assertion failure's sibling, it *is* one, so use AllowCount(0) absent
    // the override to show the override still forces propagation for a
    // non-assertion error.
    use stepwise_model::{ModelBuilder, StepDef};

    struct State;
    let model = ModelBuilder::<State>::new()
        .step(
            "boom",
            StepDef::new(|_: &mut State| Err(anyhow::anyhow!("io error, not an assertion"))),
        )
        .build()
        .unwrap();

    let config = EngineConfig::new(Length::new(10).unwrap(), Length::new(1).unwrap())
        .with_test_error_strategy(stepwise_strategies::AlwaysIgnore)
        .with_stop_test_on_exception(true)
        .build();
    let mut engine = Engine::new(model, config);
    let mut state = State;

    // WHEN the suite runs
    let result = engine.run(&mut state);

    // THEN the non-assertion error still propagates out of the test despite
    // AlwaysIgnore, because of the override.
    assert!(matches!(result, Err(EngineError::StepFailed { .. })));
}
