/// A hook or step action: mutates the model, may fail.
pub type Action<M> = Box<dyn FnMut(&mut M) -> anyhow::Result<()> + Send>;

/// A guard predicate: reads the model, may fail to evaluate.
pub type Guard<M> = Box<dyn Fn(&M) -> anyhow::Result<bool> + Send + Sync>;

/// A weight provider: reads the model, yields a raw (not yet validated)
/// weight. Re-evaluated fresh on every `Weighted`/`WeightedBalancing` call.
pub type WeightFn<M> = Box<dyn Fn(&M) -> anyhow::Result<f64> + Send + Sync>;

fn infallible_guard<M>(
    predicate: impl Fn(&M) -> bool + Send + Sync + 'static,
) -> Guard<M> {
    Box::new(move |m| Ok(predicate(m)))
}

fn infallible_weight<M>(
    provider: impl Fn(&M) -> f64 + Send + Sync + 'static,
) -> WeightFn<M> {
    Box::new(move |m| Ok(provider(m)))
}

/// A weight as attached to a step, before `ModelBuilder::build()` resolves
/// it to a [`WeightFn`]. Kept apart from `WeightFn` (rather than boxing a
/// constant straight into a closure) so `build()` can validate a constant
/// weight against [`stepwise_core::Weight::new`] at introspection time —
/// the same enum a named `weight_for`/`weight_fn_for` declaration in
/// `crate::builder` resolves through, so both paths get the same check.
pub(crate) enum WeightSpec<M> {
    Constant(f64),
    Computed(WeightFn<M>),
}

/// A single step's definition, as the user supplies it to a
/// [`crate::ModelBuilder`].
///
/// The spec's four-tier guard/weight priority resolution collapses here to
/// two tiers, since Rust has no runtime method reflection to rank against:
/// whatever is attached directly to the `StepDef` ("inline") beats a
/// separately-declared `guard_for`/`weight_for` registered on the builder by
/// name, which in turn beats the default (`true` / `1.0`). See `DESIGN.md`.
pub struct StepDef<M> {
    pub(crate) action: Action<M>,
    pub(crate) guard: Option<Guard<M>>,
    pub(crate) weight: Option<WeightSpec<M>>,
    pub(crate) pre: Option<Action<M>>,
    pub(crate) post: Option<Action<M>>,
}

impl<M> StepDef<M> {
    pub fn new(action: impl FnMut(&mut M) -> anyhow::Result<()> + Send + 'static) -> Self {
        Self {
            action: Box::new(action),
            guard: None,
            weight: None,
            pre: None,
            post: None,
        }
    }

    /// Sets a constant enabled/disabled flag (tier 1: "explicit per-step
    /// enabled flag"). Overrides any previously attached guard.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.guard = Some(infallible_guard(move |_| enabled));
        self
    }

    /// Attaches an inline guard (tier 2).
    pub fn guard(mut self, predicate: impl Fn(&M) -> bool + Send + Sync + 'static) -> Self {
        self.guard = Some(infallible_guard(predicate));
        self
    }

    /// Attaches a fallible inline guard. A guard evaluation error is routed
    /// through the test-level error strategy with no step having executed
    /// yet.
    pub fn guard_fallible(
        mut self,
        predicate: impl Fn(&M) -> anyhow::Result<bool> + Send + Sync + 'static,
    ) -> Self {
        self.guard = Some(Box::new(predicate));
        self
    }

    /// Attaches a constant inline weight. Validated against the
    /// finite-and-positive invariant by `ModelBuilder::build()`, the same
    /// as a named `weight_for` constant.
    pub fn weight(mut self, constant: f64) -> Self {
        self.weight = Some(WeightSpec::Constant(constant));
        self
    }

    /// Attaches a computed inline weight, evaluated fresh on each selection.
    pub fn weight_fn(mut self, provider: impl Fn(&M) -> f64 + Send + Sync + 'static) -> Self {
        self.weight = Some(WeightSpec::Computed(infallible_weight(provider)));
        self
    }

    /// Binds a pre-hook to this step. A failure here is a failure of the
    /// step itself.
    pub fn pre(mut self, hook: impl FnMut(&mut M) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.pre = Some(Box::new(hook));
        self
    }

    /// Binds a post-hook to this step.
    pub fn post(mut self, hook: impl FnMut(&mut M) -> anyhow::Result<()> + Send + 'static) -> Self {
        self.post = Some(Box::new(hook));
        self
    }
}
