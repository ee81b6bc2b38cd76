//! The recorded hook trace must be a valid sentence of
//! `before_suite (before_test (before pre_X X post_X after)* after_test)*
//! after_suite`, and every `before_L` must have a matching `after_L`.

use stepwise_algorithms::Random;
use stepwise_conditions::Length;
use stepwise_engine::{Engine, EngineConfig, HookKind, HookTrace};
use stepwise_tests_support::model::{counter_model, CounterState};

fn assert_valid_sentence(events: &[stepwise_engine::HookEvent]) {
    let mut idx = 0;
    let next = |idx: &mut usize| events.get(*idx).map(|e| e.kind);

    assert_eq!(next(&mut idx), Some(HookKind::BeforeSuite));
    idx += 1;

    while next(&mut idx) == Some(HookKind::BeforeTest) {
        idx += 1;
        while next(&mut idx) == Some(HookKind::Before) {
            idx += 1;
            assert_eq!(next(&mut idx), Some(HookKind::PreStep));
            idx += 1;
            assert_eq!(next(&mut idx), Some(HookKind::Step));
            idx += 1;
            assert_eq!(next(&mut idx), Some(HookKind::PostStep));
            idx += 1;
            assert_eq!(next(&mut idx), Some(HookKind::After));
            idx += 1;
        }
        assert_eq!(next(&mut idx), Some(HookKind::AfterTest));
        idx += 1;
    }

    assert_eq!(next(&mut idx), Some(HookKind::AfterSuite));
    idx += 1;
    assert_eq!(idx, events.len(), "trailing events after after_suite");
}

#[test]
fn hook_trace_is_a_valid_grammar_sentence() {
    // GIVEN a model run to completion with a hook trace attached
    let model = counter_model().expect("model builds");
    let trace = HookTrace::new();
    let config = EngineConfig::new(Length::new(3).unwrap(), Length::new(2).unwrap())
        .with_seed(11)
        .with_algorithm(Random)
        .with_hook_trace(trace.clone())
        .build();
    let mut engine = Engine::new(model, config);
    let mut state = CounterState::default();

    // WHEN the suite runs
    engine.run(&mut state).expect("no errors in this model");

    // THEN the trace is a valid sentence of the hook grammar
    let events = trace.events();
    assert_valid_sentence(&events);

    // AND before/after nesting counts match at every level
    let count = |kind: HookKind| events.iter().filter(|e| e.kind == kind).count();
    assert_eq!(count(HookKind::BeforeSuite), count(HookKind::AfterSuite));
    assert_eq!(count(HookKind::BeforeTest), count(HookKind::AfterTest));
    assert_eq!(count(HookKind::Before), count(HookKind::After));
    assert_eq!(count(HookKind::PreStep), count(HookKind::Step));
    assert_eq!(count(HookKind::Step), count(HookKind::PostStep));

    // AND exactly two tests ran (suite_end_condition = Length(2))
    assert_eq!(count(HookKind::BeforeTest), 2);
}

#[test]
fn same_seed_produces_an_identical_hook_trace() {
    use pretty_assertions::assert_eq;

    // GIVEN two engines built from the same model and seed
    let run_once = || {
        let model = counter_model().expect("model builds");
        let trace = HookTrace::new();
        let config = EngineConfig::new(Length::new(3).unwrap(), Length::new(2).unwrap())
            .with_seed(11)
            .with_algorithm(Random)
            .with_hook_trace(trace.clone())
            .build();
        let mut engine = Engine::new(model, config);
        let mut state = CounterState::default();
        engine.run(&mut state).expect("no errors in this model");
        trace.events()
    };

    // WHEN both runs complete
    let first = run_once();
    let second = run_once();

    // THEN their recorded (kind, step) event sequences are field-for-field
    // identical — a mismatch here would print a readable per-field diff
    // instead of two opaque `Vec<HookEvent>` dumps.
    assert_eq!(first, second);
}

#[test]
fn before_test_failure_still_runs_matching_after_test() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use stepwise_model::{ModelBuilder, StepDef};
    use stepwise_strategies::AlwaysIgnore;

    struct State;

    // GIVEN a model whose before_test hook always fails
    let after_test_calls = Arc::new(AtomicUsize::new(0));
    let counted = after_test_calls.clone();
    let model = ModelBuilder::<State>::new()
        .before_test(|_| Err(anyhow::anyhow!("before_test boom")))
        .after_test(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .step("noop", StepDef::new(|_: &mut State| Ok(())))
        .build()
        .expect("model builds");

    let trace = HookTrace::new();
    let config = EngineConfig::new(Length::new(1).unwrap(), Length::new(2).unwrap())
        .with_suite_error_strategy(AlwaysIgnore)
        .with_hook_trace(trace.clone())
        .build();
    let mut engine = Engine::new(model, config);
    let mut state = State;

    // WHEN the suite runs, absorbing the before_test failure each time
    engine.run(&mut state).expect("suite-level strategy absorbs");

    // THEN after_test ran once per test, matching before_test, despite the
    // TEST loop never starting.
    assert_eq!(after_test_calls.load(Ordering::SeqCst), 2);
    let events = trace.events();
    let count = |kind: HookKind| events.iter().filter(|e| e.kind == kind).count();
    assert_eq!(count(HookKind::BeforeTest), count(HookKind::AfterTest));
    assert_eq!(count(HookKind::BeforeTest), 2);
}

#[test]
fn before_step_failure_still_runs_matching_after() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use stepwise_model::{ModelBuilder, StepDef};
    use stepwise_strategies::{AllowCount, AlwaysIgnore};

    struct State;

    // GIVEN a model whose step-level before hook always fails, and
    // AllowCount(2) so the test ends (via propagation) after exactly three
    // before/after pairs — a Length(n) test-end condition would never fire
    // here since no step ever completes to increment the step count.
    let after_calls = Arc::new(AtomicUsize::new(0));
    let counted = after_calls.clone();
    let model = ModelBuilder::<State>::new()
        .before(|_| Err(anyhow::anyhow!("before boom")))
        .after(move |_| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .step("noop", StepDef::new(|_: &mut State| Ok(())))
        .build()
        .expect("model builds");

    let trace = HookTrace::new();
    let config = EngineConfig::new(Length::new(10).unwrap(), Length::new(1).unwrap())
        .with_test_error_strategy(AllowCount::new(2))
        .with_suite_error_strategy(AlwaysIgnore)
        .with_hook_trace(trace.clone())
        .build();
    let mut engine = Engine::new(model, config);
    let mut state = State;

    // WHEN the suite runs: the first two before-failures absorb, the third
    // propagates out of the test, which the suite-level strategy absorbs.
    engine.run(&mut state).expect("suite-level strategy absorbs");

    // THEN after ran once per before, despite no step ever being chosen
    assert_eq!(after_calls.load(Ordering::SeqCst), 3);
    let events = trace.events();
    let count = |kind: HookKind| events.iter().filter(|e| e.kind == kind).count();
    assert_eq!(count(HookKind::Before), count(HookKind::After));
    assert_eq!(count(HookKind::Before), 3);
    assert_eq!(count(HookKind::PreStep), 0);
}
