//! Stepwise Model Introspection
//!
//! Resolves a user-supplied model into an immutable Step catalogue plus
//! bound lifecycle hooks.
//!
//! Rust has no runtime method reflection, so duck-typed step discovery by
//! naming convention becomes an explicit builder: [`ModelBuilder`] collects
//! named [`StepDef`]s and hook closures, and [`ModelBuilder::build`]
//! resolves them into a single uniform catalogue, a [`Model`].

mod builder;
mod error;
mod model;
mod step_def;

pub use builder::ModelBuilder;
pub use error::{ModelError, ModelResult};
pub use model::{Model, ResolvedStep};
pub use step_def::{Action, Guard, StepDef, WeightFn};
