//! Stepwise Error Strategies
//!
//! Two-level policies deciding whether an error halts or is absorbed.

mod decision;
mod kinds;
mod strategy;

pub use decision::Decision;
pub use kinds::{is_assertion_failure, AllowCount, AlwaysIgnore, AlwaysRaise, IgnoreAssertions};
pub use strategy::ErrorStrategy;
