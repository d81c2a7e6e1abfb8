use crate::domain::models::{FailureMode, RunVerdict, VerificationFailure};

/// Collects per-endpoint outcomes in encounter order.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    failures: Vec<VerificationFailure>,
    checked: usize,
    skipped: usize,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, failure: VerificationFailure) {
        self.failures.push(failure);
    }

    pub fn note_checked(&mut self) {
        self.checked += 1;
    }

    pub fn note_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn summarize(self, mode: FailureMode) -> RunVerdict {
        RunVerdict {
            passed: self.failures.is_empty(),
            mode,
            checked: self.checked,
            skipped: self.skipped,
            failures: self.failures,
        }
    }
}
