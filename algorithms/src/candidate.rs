use stepwise_core::StepName;

/// One enabled step offered to a [`crate::SelectionAlgorithm`], with its
/// raw (not yet validated) weight already evaluated by the engine against
/// the current model state — algorithms never see the model itself, only
/// names and numbers, so this crate doesn't depend on `stepwise-model`.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub name: &'a StepName,
    pub weight: f64,
}
