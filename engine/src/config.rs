use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use stepwise_algorithms::{Random, SelectionAlgorithm};
use stepwise_conditions::EndCondition;
use stepwise_strategies::{AlwaysRaise, ErrorStrategy};

use crate::hook_trace::HookTrace;

/// Engine configuration: a plain in-process builder, with no config-file or
/// CLI-flag loading (see `DESIGN.md` for the dropped serde dependency).
///
/// Construction is fixed at `build()` time: there is no setter that mutates
/// a config already handed to a running engine; a new configuration means
/// a new engine.
pub struct EngineConfig {
    pub(crate) seed: u64,
    pub(crate) algorithm: Box<dyn SelectionAlgorithm>,
    pub(crate) test_end_condition: Box<dyn EndCondition>,
    pub(crate) suite_end_condition: Box<dyn EndCondition>,
    pub(crate) test_error_strategy: Box<dyn ErrorStrategy>,
    pub(crate) suite_error_strategy: Box<dyn ErrorStrategy>,
    pub(crate) stop_on_fail: bool,
    pub(crate) stop_test_on_exception: bool,
    pub(crate) interrupt: Option<Arc<AtomicBool>>,
    pub(crate) hook_trace: Option<HookTrace>,
}

/// Builder for [`EngineConfig`]. Only the two end conditions are mandatory
/// (a run has to know when to stop); everything else has a sensible
/// default, following `TestConfig::default()`'s "reasonable out of the box,
/// override what you need" shape.
pub struct EngineConfigBuilder {
    seed: Option<u64>,
    algorithm: Box<dyn SelectionAlgorithm>,
    test_end_condition: Box<dyn EndCondition>,
    suite_end_condition: Box<dyn EndCondition>,
    test_error_strategy: Box<dyn ErrorStrategy>,
    suite_error_strategy: Box<dyn ErrorStrategy>,
    stop_on_fail: bool,
    stop_test_on_exception: bool,
    interrupt: Option<Arc<AtomicBool>>,
    hook_trace: Option<HookTrace>,
}

impl EngineConfig {
    /// Starts a builder with the given end conditions and every other
    /// option at its default (`Random` algorithm, `AlwaysRaise` at both
    /// levels, no stop overrides, no interrupt handle, no hook trace).
    pub fn new(
        test_end_condition: impl EndCondition + 'static,
        suite_end_condition: impl EndCondition + 'static,
    ) -> EngineConfigBuilder {
        EngineConfigBuilder {
            seed: None,
            algorithm: Box::new(Random),
            test_end_condition: Box::new(test_end_condition),
            suite_end_condition: Box::new(suite_end_condition),
            test_error_strategy: Box::new(AlwaysRaise),
            suite_error_strategy: Box::new(AlwaysRaise),
            stop_on_fail: false,
            stop_test_on_exception: false,
            interrupt: None,
            hook_trace: None,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn hook_trace(&self) -> Option<&HookTrace> {
        self.hook_trace.as_ref()
    }
}

impl EngineConfigBuilder {
    /// Seeds the RNG explicitly. If never called, the seed is derived from
    /// the current time at `build()`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_algorithm(mut self, algorithm: impl SelectionAlgorithm + 'static) -> Self {
        self.algorithm = Box::new(algorithm);
        self
    }

    pub fn with_test_error_strategy(mut self, strategy: impl ErrorStrategy + 'static) -> Self {
        self.test_error_strategy = Box::new(strategy);
        self
    }

    pub fn with_suite_error_strategy(mut self, strategy: impl ErrorStrategy + 'static) -> Self {
        self.suite_error_strategy = Box::new(strategy);
        self
    }

    pub fn with_stop_on_fail(mut self, stop_on_fail: bool) -> Self {
        self.stop_on_fail = stop_on_fail;
        self
    }

    pub fn with_stop_test_on_exception(mut self, stop_test_on_exception: bool) -> Self {
        self.stop_test_on_exception = stop_test_on_exception;
        self
    }

    /// Registers a cooperative interrupt flag the engine checks once per
    /// STEP iteration.
    pub fn interrupt_handle(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Attaches a sink collecting every hook invocation in order, so tests
    /// can assert the hook-ordering grammar directly.
    pub fn with_hook_trace(mut self, trace: HookTrace) -> Self {
        self.hook_trace = Some(trace);
        self
    }

    pub fn build(self) -> EngineConfig {
        let seed = self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        EngineConfig {
            seed,
            algorithm: self.algorithm,
            test_end_condition: self.test_end_condition,
            suite_end_condition: self.suite_end_condition,
            test_error_strategy: self.test_error_strategy,
            suite_error_strategy: self.suite_error_strategy,
            stop_on_fail: self.stop_on_fail,
            stop_test_on_exception: self.stop_test_on_exception,
            interrupt: self.interrupt,
            hook_trace: self.hook_trace,
        }
    }
}
