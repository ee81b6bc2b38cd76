//! Stepwise History Ledger
//!
//! The append-only, single-writer record of suites, tests, steps, and
//! errors. Feeds end-condition evaluation, coverage queries, and reporting.
//!
//! Responsibilities:
//! - Track the currently open test case, if any.
//! - Append step logs to it.
//! - Seal tests and expose derived statistics.

mod error;
mod history;
mod step_log;
mod test_case_record;

pub use error::{HistoryError, HistoryResult};
pub use history::{coverage_percentage, History};
pub use step_log::TestStepLog;
pub use test_case_record::TestCaseRecord;
