use std::collections::HashMap;

use stepwise_core::{StepName, Weight};

use crate::error::{ModelError, ModelResult};
use crate::model::{Model, ResolvedStep};
use crate::step_def::{Action, Guard, StepDef, WeightFn, WeightSpec};

/// Validates and resolves a [`WeightSpec`] to a [`WeightFn`], used for both
/// an inline `StepDef::weight`/`weight_fn` and a named `weight_for`/
/// `weight_fn_for` — a constant is checked against
/// [`stepwise_core::Weight::new`] right here, at introspection time,
/// regardless of which of the two ways it was declared.
fn resolve_weight<M>(name: &StepName, spec: WeightSpec<M>) -> ModelResult<WeightFn<M>> {
    match spec {
        WeightSpec::Constant(value) => {
            Weight::new(value).map_err(|_| ModelError::InvalidWeight {
                step: name.clone(),
                value,
            })?;
            Ok(Box::new(move |_: &M| Ok(value)))
        }
        WeightSpec::Computed(f) => Ok(f),
    }
}

/// Builds a [`Model`] from named [`StepDef`]s plus lifecycle hooks.
///
/// Composite models
/// are expressed by building several `ModelBuilder`s independently and
/// [`ModelBuilder::merge`]ing them: catalogues are unioned, hook chains are
/// concatenated in supply order, and duplicate step names are rejected at
/// `build()`.
pub struct ModelBuilder<M> {
    steps: Vec<(StepName, StepDef<M>)>,
    guard_for: HashMap<StepName, Guard<M>>,
    weight_for: HashMap<StepName, WeightSpec<M>>,
    before_suite: Vec<Action<M>>,
    after_suite: Vec<Action<M>>,
    before_test: Vec<Action<M>>,
    after_test: Vec<Action<M>>,
    before: Vec<Action<M>>,
    after: Vec<Action<M>>,
}

impl<M> Default for ModelBuilder<M> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            guard_for: HashMap::new(),
            weight_for: HashMap::new(),
            before_suite: Vec::new(),
            after_suite: Vec::new(),
            before_test: Vec::new(),
            after_test: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
        }
    }
}

impl<M> ModelBuilder<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, name: impl Into<StepName>, def: StepDef<M>) -> Self {
        self.steps.push((name.into(), def));
        self
    }

    /// Tier-3 guard resolution: a guard declared separately, targeting a
    /// step by name, rather than attached inline to its `StepDef`.
    pub fn guard_for(
        mut self,
        name: impl Into<StepName>,
        predicate: impl Fn(&M) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.guard_for
            .insert(name.into(), Box::new(move |m| Ok(predicate(m))));
        self
    }

    /// Tier-3 weight resolution: a constant weight declared by name.
    pub fn weight_for(mut self, name: impl Into<StepName>, constant: f64) -> Self {
        self.weight_for
            .insert(name.into(), WeightSpec::Constant(constant));
        self
    }

    /// Tier-3 weight resolution: a computed weight declared by name.
    pub fn weight_fn_for(
        mut self,
        name: impl Into<StepName>,
        provider: impl Fn(&M) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.weight_for.insert(
            name.into(),
            WeightSpec::Computed(Box::new(move |m| Ok(provider(m)))),
        );
        self
    }

    pub fn before_suite(mut self, hook: impl FnMut(&mut M) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.before_suite.push(Box::new(hook));
        self
    }

    pub fn after_suite(mut self, hook: impl FnMut(&mut M) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.after_suite.push(Box::new(hook));
        self
    }

    pub fn before_test(mut self, hook: impl FnMut(&mut M) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.before_test.push(Box::new(hook));
        self
    }

    pub fn after_test(mut self, hook: impl FnMut(&mut M) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.after_test.push(Box::new(hook));
        self
    }

    pub fn before(mut self, hook: impl FnMut(&mut M) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.before.push(Box::new(hook));
        self
    }

    pub fn after(mut self, hook: impl FnMut(&mut M) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.after.push(Box::new(hook));
        self
    }

    /// Unions `other`'s catalogue and hooks into `self`, with `other`'s
    /// hooks running after `self`'s at every level (supply order).
    pub fn merge(mut self, other: Self) -> Self {
        self.steps.extend(other.steps);
        self.guard_for.extend(other.guard_for);
        self.weight_for.extend(other.weight_for);
        self.before_suite.extend(other.before_suite);
        self.after_suite.extend(other.after_suite);
        self.before_test.extend(other.before_test);
        self.after_test.extend(other.after_test);
        self.before.extend(other.before);
        self.after.extend(other.after);
        self
    }

    pub fn build(self) -> ModelResult<Model<M>> {
        let mut seen = std::collections::HashSet::new();
        for (name, _) in &self.steps {
            if !seen.insert(name.clone()) {
                return Err(ModelError::DuplicateStep(name.clone()));
            }
        }
        if self.steps.is_empty() {
            return Err(ModelError::NoSteps);
        }

        let mut guard_for = self.guard_for;
        let mut weight_for = self.weight_for;

        let mut resolved = Vec::with_capacity(self.steps.len());
        for (name, def) in self.steps {
            let guard = match def.guard {
                Some(g) => g,
                None => match guard_for.remove(&name) {
                    Some(g) => g,
                    None => Box::new(|_: &M| Ok(true)),
                },
            };
            // Still remove a matched named guard even when the inline guard
            // won, so the "every guard_for target exists" check below does
            // not double-count it.
            guard_for.remove(&name);

            let weight = match def.weight {
                Some(spec) => resolve_weight(&name, spec)?,
                None => match weight_for.remove(&name) {
                    Some(spec) => resolve_weight(&name, spec)?,
                    None => Box::new(|_: &M| Ok(Weight::DEFAULT)) as WeightFn<M>,
                },
            };
            // Still remove a matched named weight even when the inline
            // weight won, so the "every weight_for target exists" check
            // below does not double-count it.
            weight_for.remove(&name);

            resolved.push(ResolvedStep::new(
                name, def.action, guard, weight, def.pre, def.post,
            ));
        }

        if let Some((name, _)) = guard_for.into_iter().next() {
            return Err(ModelError::UnknownGuardTarget(name));
        }
        if let Some((name, _)) = weight_for.into_iter().next() {
            return Err(ModelError::UnknownGuardTarget(name));
        }

        Ok(Model::new(
            resolved,
            self.before_suite,
            self.after_suite,
            self.before_test,
            self.after_test,
            self.before,
            self.after,
        ))
    }
}
