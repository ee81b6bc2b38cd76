use stepwise_core::StepName;

use crate::step_def::{Action, Guard, WeightFn};

/// A step resolved at introspection time to a single uniform invokable
/// record.
pub struct ResolvedStep<M> {
    name: StepName,
    action: Action<M>,
    guard: Guard<M>,
    weight: WeightFn<M>,
    pre: Option<Action<M>>,
    post: Option<Action<M>>,
}

impl<M> ResolvedStep<M> {
    pub(crate) fn new(
        name: StepName,
        action: Action<M>,
        guard: Guard<M>,
        weight: WeightFn<M>,
        pre: Option<Action<M>>,
        post: Option<Action<M>>,
    ) -> Self {
        Self {
            name,
            action,
            guard,
            weight,
            pre,
            post,
        }
    }

    pub fn name(&self) -> &StepName {
        &self.name
    }

    /// Evaluates this step's guard against the current model state.
    pub fn is_enabled(&self, state: &M) -> anyhow::Result<bool> {
        (self.guard)(state)
    }

    /// Evaluates this step's weight against the current model state. Not
    /// yet validated against the finite-and-positive invariant; callers
    /// (the selection algorithms) validate via `stepwise_core::Weight::new`.
    pub fn raw_weight(&self, state: &M) -> anyhow::Result<f64> {
        (self.weight)(state)
    }

    pub fn run_pre(&mut self, state: &mut M) -> anyhow::Result<()> {
        match &mut self.pre {
            Some(hook) => hook(state),
            None => Ok(()),
        }
    }

    pub fn run(&mut self, state: &mut M) -> anyhow::Result<()> {
        (self.action)(state)
    }

    pub fn run_post(&mut self, state: &mut M) -> anyhow::Result<()> {
        match &mut self.post {
            Some(hook) => hook(state),
            None => Ok(()),
        }
    }
}

/// An introspected, immutable catalogue of steps plus bound lifecycle hooks.
/// Built once by [`crate::ModelBuilder::build`] and held for the lifetime of
/// the suite.
pub struct Model<M> {
    steps: Vec<ResolvedStep<M>>,
    before_suite: Vec<Action<M>>,
    after_suite: Vec<Action<M>>,
    before_test: Vec<Action<M>>,
    after_test: Vec<Action<M>>,
    before: Vec<Action<M>>,
    after: Vec<Action<M>>,
}

impl<M> Model<M> {
    pub(crate) fn new(
        steps: Vec<ResolvedStep<M>>,
        before_suite: Vec<Action<M>>,
        after_suite: Vec<Action<M>>,
        before_test: Vec<Action<M>>,
        after_test: Vec<Action<M>>,
        before: Vec<Action<M>>,
        after: Vec<Action<M>>,
    ) -> Self {
        Self {
            steps,
            before_suite,
            after_suite,
            before_test,
            after_test,
            before,
            after,
        }
    }

    pub fn catalogue(&self) -> impl Iterator<Item = &StepName> {
        self.steps.iter().map(|s| s.name())
    }

    pub fn step_names(&self) -> Vec<StepName> {
        self.steps.iter().map(|s| s.name().clone()).collect()
    }

    pub fn steps(&self) -> &[ResolvedStep<M>] {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut [ResolvedStep<M>] {
        &mut self.steps
    }

    pub fn step_mut(&mut self, name: &StepName) -> Option<&mut ResolvedStep<M>> {
        self.steps.iter_mut().find(|s| s.name() == name)
    }

    /// Runs every constituent's hook in supply order, stopping at (and
    /// returning) the first failure, but still having attempted to run all
    /// hooks that preceded it — callers decide what "still run the rest"
    /// means for their level via the cleanup discipline in the engine.
    pub(crate) fn run_chain(hooks: &mut [Action<M>], state: &mut M) -> anyhow::Result<()> {
        for hook in hooks.iter_mut() {
            hook(state)?;
        }
        Ok(())
    }

    pub fn run_before_suite(&mut self, state: &mut M) -> anyhow::Result<()> {
        Self::run_chain(&mut self.before_suite, state)
    }

    pub fn run_after_suite(&mut self, state: &mut M) -> anyhow::Result<()> {
        Self::run_chain(&mut self.after_suite, state)
    }

    pub fn run_before_test(&mut self, state: &mut M) -> anyhow::Result<()> {
        Self::run_chain(&mut self.before_test, state)
    }

    pub fn run_after_test(&mut self, state: &mut M) -> anyhow::Result<()> {
        Self::run_chain(&mut self.after_test, state)
    }

    pub fn run_before(&mut self, state: &mut M) -> anyhow::Result<()> {
        Self::run_chain(&mut self.before, state)
    }

    pub fn run_after(&mut self, state: &mut M) -> anyhow::Result<()> {
        Self::run_chain(&mut self.after, state)
    }

    pub fn has_before_suite(&self) -> bool {
        !self.before_suite.is_empty()
    }

    pub fn has_after_suite(&self) -> bool {
        !self.after_suite.is_empty()
    }
}
