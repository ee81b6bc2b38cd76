//! A suite with
//! `test_end_condition = Length(n)`, `suite_end_condition = Length(m)`, and
//! no errors produces exactly `m` tests each with exactly `n` steps.

use proptest::prelude::*;
use stepwise_algorithms::Random;
use stepwise_conditions::Length;
use stepwise_engine::{Engine, EngineConfig};
use stepwise_tests_support::model::{counter_model, CounterState};

proptest! {
    #[test]
    fn length_by_length_produces_exact_shape(n in 1usize..12, m in 1usize..8, seed in any::<u64>()) {
        let model = counter_model().expect("model builds");
        let config = EngineConfig::new(Length::new(n).unwrap(), Length::new(m).unwrap())
            .with_seed(seed)
            .with_algorithm(Random)
            .build();
        let mut engine = Engine::new(model, config);
        let mut state = CounterState::default();

        let history = engine.run(&mut state).expect("no errors in this model");

        prop_assert_eq!(history.sealed_test_count(), m);
        for test in history.tests() {
            prop_assert_eq!(test.step_count(), n);
            prop_assert!(test.stopped());
        }
        prop_assert_eq!(history.total_steps(), n * m);
    }
}
