use thiserror::Error;

/// Errors raised by the history ledger.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// `start_test` was called while a test was already open.
    #[error("cannot start a test: a test is already open")]
    TestAlreadyOpen,

    /// `append_step` was called with no test open.
    #[error("cannot append a step: no test is open")]
    NoOpenTest,
}

pub type HistoryResult<T> = Result<T, HistoryError>;
