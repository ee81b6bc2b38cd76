//! Stepwise Execution Engine
//!
//! Drives the nested `IDLE -> SUITE -> TEST -> STEP -> ... -> IDLE` state
//! machine, composing the history ledger, model introspection, end
//! conditions, error strategies, and selection algorithms behind one entry
//! point.
//!
//! Application code depends on this crate alone; [`prelude`] re-exports the
//! public surface of every other `stepwise-*` crate so callers don't need
//! to add each one as a direct dependency.

mod config;
mod engine;
mod error;
mod hook_trace;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use hook_trace::{HookEvent, HookKind, HookTrace};

/// Everything needed to build a model, configure an engine, and run a
/// suite, in one `use stepwise_engine::prelude::*;`.
pub mod prelude {
    pub use crate::{Engine, EngineConfig, EngineConfigBuilder, EngineError, EngineResult};
    pub use crate::{HookEvent, HookKind, HookTrace};

    pub use stepwise_algorithms::{
        AlgorithmError, AlgorithmResult, Balancing, Candidate, Random, SelectionAlgorithm,
        Weighted, WeightedBalancing,
    };
    pub use stepwise_conditions::{
        And, ConditionError, ConditionResult, EndCondition, Endless, EvalContext, Length, Or,
        StepCoverage, Time,
    };
    pub use stepwise_core::{AssertionFailure, CoreError, CoreResult, Outcome, StepName, Weight};
    pub use stepwise_history::{History, HistoryError, HistoryResult, TestCaseRecord, TestStepLog};
    pub use stepwise_model::{Model, ModelBuilder, ModelError, ModelResult, ResolvedStep};
    pub use stepwise_strategies::{
        is_assertion_failure, AllowCount, AlwaysIgnore, AlwaysRaise, Decision, ErrorStrategy,
        IgnoreAssertions,
    };
}
