use std::collections::{HashMap, HashSet};
use std::time::Instant;

use stepwise_core::StepName;

use crate::error::{HistoryError, HistoryResult};
use crate::step_log::TestStepLog;
use crate::test_case_record::TestCaseRecord;

/// The append-only, single-writer record of an engine run. The engine is the only mutator; queries never see a stale view
/// because there is no concurrency.
#[derive(Debug, Clone, Default)]
pub struct History {
    tests: Vec<TestCaseRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new open test record and appends it. Fails if another test
    /// is already open.
    pub fn start_test(&mut self, now: Instant) -> HistoryResult<&mut TestCaseRecord> {
        if self.current_test().is_some_and(|t| !t.stopped()) {
            return Err(HistoryError::TestAlreadyOpen);
        }
        self.tests.push(TestCaseRecord::open(now));
        Ok(self.tests.last_mut().expect("just pushed"))
    }

    /// Seals the open record. No-op if none is open.
    pub fn end_current_test(&mut self, now: Instant) {
        if let Some(test) = self.tests.last_mut() {
            if !test.stopped() {
                test.seal(now);
            }
        }
    }

    /// Appends to the open record's step log. Fails if no test is open.
    pub fn append_step(&mut self, log: TestStepLog) -> HistoryResult<()> {
        match self.tests.last_mut() {
            Some(test) if !test.stopped() => {
                test.push_step(log);
                Ok(())
            }
            _ => Err(HistoryError::NoOpenTest),
        }
    }

    /// The last test case record, open or sealed, if any test has started.
    pub fn current_test(&self) -> Option<&TestCaseRecord> {
        self.tests.last()
    }

    pub fn tests(&self) -> &[TestCaseRecord] {
        &self.tests
    }

    pub fn sealed_test_count(&self) -> usize {
        self.tests.iter().filter(|t| t.stopped()).count()
    }

    /// Sum of step records across every test in the suite.
    pub fn total_steps(&self) -> usize {
        self.tests.iter().map(|t| t.step_count()).sum()
    }

    /// Count per step name, across the whole suite.
    pub fn step_frequency(&self) -> HashMap<StepName, usize> {
        let mut freq = HashMap::new();
        for test in &self.tests {
            for log in test.steps() {
                *freq.entry(log.step().clone()).or_insert(0) += 1;
            }
        }
        freq
    }

    /// Distinct step names executed across the whole suite.
    pub fn unique_steps_executed(&self) -> HashSet<StepName> {
        self.tests
            .iter()
            .flat_map(|t| t.steps())
            .map(|log| log.step().clone())
            .collect()
    }

    /// `|unique_steps_executed ∩ catalogue| / |catalogue| * 100`, evaluated
    /// across the whole suite.
    pub fn coverage_percentage(&self, catalogue: &[StepName]) -> f64 {
        coverage_percentage(self.unique_steps_executed().iter(), catalogue)
    }
}

/// Shared by `History::coverage_percentage` (suite scope) and the
/// test-level `StepCoverage` end condition (current test's scope).
pub fn coverage_percentage<'a>(
    executed: impl Iterator<Item = &'a StepName>,
    catalogue: &[StepName],
) -> f64 {
    if catalogue.is_empty() {
        return 100.0;
    }
    let executed: HashSet<&StepName> = executed.collect();
    let covered = catalogue.iter().filter(|s| executed.contains(s)).count();
    (covered as f64 / catalogue.len() as f64) * 100.0
}
