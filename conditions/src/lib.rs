//! Stepwise End Conditions
//!
//! Composable predicate objects evaluated against `History` to decide when
//! a test or the whole suite should stop.

mod context;
mod end_condition;
mod error;
mod kinds;

pub use context::EvalContext;
pub use end_condition::EndCondition;
pub use error::{ConditionError, ConditionResult};
pub use kinds::{And, Endless, Length, Or, StepCoverage, Time};
