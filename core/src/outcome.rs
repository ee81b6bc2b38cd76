/// Whether a recorded step completed or errored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Error,
}

impl Outcome {
    pub fn is_ok(self) -> bool {
        matches!(self, Outcome::Ok)
    }

    pub fn is_error(self) -> bool {
        matches!(self, Outcome::Error)
    }
}
