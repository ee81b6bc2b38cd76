use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use stepwise_algorithms::{AlgorithmError, Candidate, SelectionAlgorithm};
use stepwise_conditions::{EndCondition, EvalContext};
use stepwise_core::{Outcome, StepName};
use stepwise_history::{History, TestStepLog};
use stepwise_model::Model;
use stepwise_strategies::{is_assertion_failure, Decision, ErrorStrategy};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::hook_trace::HookKind;

/// Why the TEST loop stopped with an error to route upward, carrying
/// exactly what [`EngineError`] needs to describe it.
///
/// `Step` covers both a step's own pre/action/post failure and a guard or
/// weight evaluation failure: the latter is treated as a test-level step
/// error with no step having yet executed, the same shape as a step
/// failure, just without a completed `TestStepLog`.
enum TestFailure {
    Step {
        step: StepName,
        underlying: Arc<anyhow::Error>,
    },
    Hook {
        hook_name: &'static str,
        underlying: anyhow::Error,
    },
    NoAvailableSteps,
    Interrupted,
}

impl TestFailure {
    fn into_engine_error(self, test: usize) -> EngineError {
        match self {
            TestFailure::Step { step, underlying } => EngineError::StepFailed {
                test,
                step,
                underlying,
            },
            TestFailure::Hook {
                hook_name,
                underlying,
            } => EngineError::HookFailed {
                hook_name,
                underlying,
            },
            TestFailure::NoAvailableSteps => EngineError::NoAvailableSteps { test },
            TestFailure::Interrupted => EngineError::Interrupted,
        }
    }
}

/// Drives the nested `IDLE -> SUITE -> TEST -> STEP -> ... -> IDLE` state
/// machine over a resolved [`Model`]. One `Engine` runs
/// exactly one suite; a new configuration means a new `Engine`.
pub struct Engine<M> {
    model: Model<M>,
    config: EngineConfig,
    rng: StdRng,
}

impl<M> Engine<M> {
    pub fn new(model: Model<M>, config: EngineConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed());
        Self { model, config, rng }
    }

    pub fn seed(&self) -> u64 {
        self.config.seed()
    }

    fn interrupted(&self) -> bool {
        self.config
            .interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    fn trace(&self, kind: HookKind, step: Option<&str>) {
        if let Some(sink) = self.config.hook_trace() {
            sink.record(kind, step);
        }
    }

    /// Runs the suite to completion, returning the sealed [`History`] on
    /// success or the first propagated failure on error.
    pub fn run(&mut self, state: &mut M) -> EngineResult<History> {
        let _span = tracing::info_span!("suite", seed = self.seed()).entered();
        let mut history = History::new();
        let suite_started_at = Instant::now();

        self.trace(HookKind::BeforeSuite, None);
        if let Err(underlying) = self.model.run_before_suite(state) {
            tracing::warn!(error = %underlying, "before_suite failed");
            self.trace(HookKind::AfterSuite, None);
            let _ = self.model.run_after_suite(state);
            return Err(EngineError::HookFailed {
                hook_name: "before_suite",
                underlying,
            });
        }

        let mut suite_error_count: usize = 0;
        let mut held_suite_error: Option<EngineError> = None;

        loop {
            let ctx = EvalContext {
                now: Instant::now(),
                suite_started_at,
            };
            if self.config.suite_end_condition.end_suite(&history, &ctx) {
                break;
            }

            let test_index = history.tests().len();
            history
                .start_test(Instant::now())
                .expect("engine never opens a test while one is already open");
            tracing::debug!(test = test_index, "test started");

            self.trace(HookKind::BeforeTest, None);
            if let Err(underlying) = self.model.run_before_test(state) {
                tracing::warn!(test = test_index, error = %underlying, "before_test failed");
                // before_test ran, so its matching after_test still runs
                // under the cleanup discipline, even though the TEST loop
                // never started.
                self.trace(HookKind::AfterTest, None);
                if let Err(e) = self.model.run_after_test(state) {
                    tracing::warn!(test = test_index, error = %e, "after_test also failed");
                }
                history.end_current_test(Instant::now());

                // before_test is a test-level hook like any other: its
                // failure is offered to the test-level strategy first, and
                // only reaches suite_error_strategy if that propagates
                // (on_suite_error runs only if the test level propagated).
                let test_decision = self
                    .config
                    .test_error_strategy
                    .on_test_error(&underlying, 1);
                if test_decision.is_propagate() {
                    suite_error_count += 1;
                    let suite_decision = self
                        .config
                        .suite_error_strategy
                        .on_suite_error(&underlying, suite_error_count);
                    if self.config.stop_on_fail || suite_decision.is_propagate() {
                        held_suite_error = Some(EngineError::HookFailed {
                            hook_name: "before_test",
                            underlying,
                        });
                        break;
                    }
                }
                continue;
            }

            let (failure, mut test_error_count) =
                self.run_test(state, &mut history, test_index, suite_started_at);

            self.trace(HookKind::AfterTest, None);
            let after_test_result = self.model.run_after_test(state);

            let mut propagate: Option<TestFailure> = failure;

            if let Err(underlying) = after_test_result {
                match &propagate {
                    Some(_) => {
                        // the test already propagated past the test-level
                        // strategy (or was interrupted); after_test's own
                        // failure just rides along, logged but not
                        // independently re-judged.
                        tracing::warn!(test = test_index, error = %underlying, "after_test also failed");
                    }
                    None => {
                        test_error_count += 1;
                        let decision = self
                            .config
                            .test_error_strategy
                            .on_test_error(&underlying, test_error_count);
                        if decision.is_propagate() {
                            propagate = Some(TestFailure::Hook {
                                hook_name: "after_test",
                                underlying,
                            });
                        } else {
                            tracing::warn!(test = test_index, error = %underlying, "after_test failed but absorbed");
                        }
                    }
                }
            }

            history.end_current_test(Instant::now());

            if let Some(failure) = propagate {
                if matches!(failure, TestFailure::Interrupted) {
                    held_suite_error = Some(EngineError::Interrupted);
                    break;
                }

                suite_error_count += 1;
                let probe = anyhow::anyhow!("test {test_index} failed");
                let decision = self
                    .config
                    .suite_error_strategy
                    .on_suite_error(&probe, suite_error_count);
                if self.config.stop_on_fail || decision.is_propagate() {
                    held_suite_error = Some(failure.into_engine_error(test_index));
                    break;
                }
            }
        }

        self.trace(HookKind::AfterSuite, None);
        if let Err(underlying) = self.model.run_after_suite(state) {
            tracing::warn!(error = %underlying, "after_suite failed");
            if held_suite_error.is_none() {
                held_suite_error = Some(EngineError::HookFailed {
                    hook_name: "after_suite",
                    underlying,
                });
            }
        }

        match held_suite_error {
            Some(err) => Err(err),
            None => Ok(history),
        }
    }

    /// Drives the STEP loop for a single test.
    /// Returns the failure that ended the test, if any (`None` means the
    /// test ended cleanly via `end_test`), alongside the test-level error
    /// count accumulated so far — the caller continues this count for an
    /// `after_test` failure in the same test.
    fn run_test(
        &mut self,
        state: &mut M,
        history: &mut History,
        test_index: usize,
        suite_started_at: Instant,
    ) -> (Option<TestFailure>, usize) {
        let mut test_error_count: usize = 0;

        loop {
            if self.interrupted() {
                return (Some(TestFailure::Interrupted), test_error_count);
            }

            let ctx = EvalContext {
                now: Instant::now(),
                suite_started_at,
            };
            if self.config.test_end_condition.end_test(history, &ctx) {
                return (None, test_error_count);
            }

            let mut candidates: Vec<(StepName, f64)> = Vec::new();
            let mut eval_failure: Option<(StepName, anyhow::Error)> = None;
            for step in self.model.steps() {
                match step.is_enabled(state) {
                    Ok(true) => match step.raw_weight(state) {
                        Ok(weight) => candidates.push((step.name().clone(), weight)),
                        Err(e) => {
                            eval_failure = Some((step.name().clone(), e));
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        eval_failure = Some((step.name().clone(), e));
                        break;
                    }
                }
            }

            if let Some((step, underlying)) = eval_failure {
                test_error_count += 1;
                let underlying = Arc::new(underlying);
                let decision = self
                    .config
                    .test_error_strategy
                    .on_test_error(&underlying, test_error_count);
                if decision.is_propagate() {
                    return (Some(TestFailure::Step { step, underlying }), test_error_count);
                }
                continue;
            }

            if candidates.is_empty() {
                let probe = anyhow::anyhow!("no available steps in test {test_index}");
                test_error_count += 1;
                let decision = self
                    .config
                    .test_error_strategy
                    .on_test_error(&probe, test_error_count);
                if decision.is_propagate() {
                    return (Some(TestFailure::NoAvailableSteps), test_error_count);
                }
                continue;
            }

            self.trace(HookKind::Before, None);
            if let Err(underlying) = self.model.run_before(state) {
                // before ran, so its matching after still runs under the
                // cleanup discipline, even though no step was chosen.
                self.trace(HookKind::After, None);
                if let Err(e) = self.model.run_after(state) {
                    tracing::warn!(error = %e, "after also failed");
                }
                test_error_count += 1;
                let decision = self
                    .config
                    .test_error_strategy
                    .on_test_error(&underlying, test_error_count);
                if decision.is_propagate() {
                    return (
                        Some(TestFailure::Hook {
                            hook_name: "before",
                            underlying,
                        }),
                        test_error_count,
                    );
                }
                continue;
            }

            let candidate_refs: Vec<Candidate<'_>> = candidates
                .iter()
                .map(|(name, weight)| Candidate {
                    name,
                    weight: *weight,
                })
                .collect();

            let chosen = match self
                .config
                .algorithm
                .choose(&candidate_refs, history, &mut self.rng)
            {
                Ok(name) => name.clone(),
                Err(e) => {
                    let step = match &e {
                        AlgorithmError::InvalidWeight { step, .. } => StepName::new(step.clone()),
                    };
                    test_error_count += 1;
                    let underlying = Arc::new(anyhow::Error::new(e));
                    let decision = self
                        .config
                        .test_error_strategy
                        .on_test_error(&underlying, test_error_count);
                    if decision.is_propagate() {
                        return (Some(TestFailure::Step { step, underlying }), test_error_count);
                    }
                    continue;
                }
            };

            let started_at = Instant::now();

            self.trace(HookKind::PreStep, Some(chosen.as_str()));
            let mut captured = self
                .model
                .step_mut(&chosen)
                .expect("algorithm chose a name from the candidates it was given")
                .run_pre(state)
                .err();

            if captured.is_none() {
                self.trace(HookKind::Step, Some(chosen.as_str()));
                captured = self
                    .model
                    .step_mut(&chosen)
                    .expect("algorithm chose a name from the candidates it was given")
                    .run(state)
                    .err();
            }

            self.trace(HookKind::PostStep, Some(chosen.as_str()));
            if let Err(e) = self
                .model
                .step_mut(&chosen)
                .expect("algorithm chose a name from the candidates it was given")
                .run_post(state)
            {
                if captured.is_none() {
                    captured = Some(e);
                } else {
                    tracing::warn!(step = %chosen, error = %e, "post-hook also failed");
                }
            }

            let duration = started_at.elapsed();

            self.trace(HookKind::After, None);
            if let Err(e) = self.model.run_after(state) {
                if captured.is_none() {
                    captured = Some(e);
                } else {
                    tracing::warn!(step = %chosen, error = %e, "after hook also failed");
                }
            }

            let outcome = if captured.is_some() {
                Outcome::Error
            } else {
                Outcome::Ok
            };
            let captured = captured.map(Arc::new);

            history
                .append_step(TestStepLog::new(
                    chosen.clone(),
                    started_at,
                    duration,
                    outcome,
                    captured.clone(),
                ))
                .expect("a test is open for the duration of this loop");

            tracing::debug!(step = %chosen, outcome = ?outcome, "step completed");

            if let Some(underlying) = captured {
                test_error_count += 1;
                let mut decision = self
                    .config
                    .test_error_strategy
                    .on_test_error(&underlying, test_error_count);
                if self.config.stop_test_on_exception && !is_assertion_failure(&underlying) {
                    decision = Decision::Propagate;
                }
                if decision.is_propagate() {
                    return (
                        Some(TestFailure::Step {
                            step: chosen,
                            underlying,
                        }),
                        test_error_count,
                    );
                }
            }
        }
    }
}
