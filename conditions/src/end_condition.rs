use stepwise_history::History;

use crate::context::EvalContext;

/// A composable predicate over [`History`], evaluated at two independent
/// levels. End conditions are evaluated *after* the step or
/// test they gate on (the tie-break rule): a test ends after the step that
/// first satisfies `end_test`, a suite ends after the test that first
/// satisfies `end_suite`.
pub trait EndCondition: Send + Sync {
    fn end_test(&self, history: &History, ctx: &EvalContext) -> bool;
    fn end_suite(&self, history: &History, ctx: &EvalContext) -> bool;
}

impl EndCondition for Box<dyn EndCondition> {
    fn end_test(&self, history: &History, ctx: &EvalContext) -> bool {
        self.as_ref().end_test(history, ctx)
    }

    fn end_suite(&self, history: &History, ctx: &EvalContext) -> bool {
        self.as_ref().end_suite(history, ctx)
    }
}
