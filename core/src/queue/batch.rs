//! Batch policy and per-item results

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// What a failing job does to the rest of its batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Cancel every job of the batch that has not started yet
    #[default]
    AbortOnFirstError,
    /// Let each job succeed or fail on its own
    ContinueOnError,
}

/// Result of one job in a batch
#[derive(Debug)]
pub struct JobOutcome {
    pub job_id: Uuid,
    pub destination: PathBuf,
    pub result: Result<PathBuf>,
}

/// Outcomes in submission order, one per job
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    pub fn new(outcomes: Vec<JobOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// Paths written
    pub fn succeeded(&self) -> impl Iterator<Item = &PathBuf> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    /// Failed or cancelled jobs
    pub fn failed(&self) -> impl Iterator<Item = &JobOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// First real failure, skipping the cancellations it caused
    pub fn first_error(&self) -> Option<&Error> {
        let mut errors = self.outcomes.iter().filter_map(|o| o.result.as_ref().err());
        let first = errors.next()?;
        if matches!(first, Error::Cancelled) {
            Some(errors.find(|e| !matches!(e, Error::Cancelled)).unwrap_or(first))
        } else {
            Some(first)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(result: Result<PathBuf>) -> JobOutcome {
        JobOutcome {
            job_id: Uuid::new_v4(),
            destination: PathBuf::from("out.png"),
            result,
        }
    }

    #[test]
    fn test_first_error_skips_cancellations() {
        let report = BatchReport::new(vec![
            outcome(Ok(PathBuf::from("a.png"))),
            outcome(Err(Error::Cancelled)),
            outcome(Err(Error::Encoding("no HEIF".to_string()))),
        ]);

        assert!(!report.is_success());
        assert_eq!(report.succeeded().count(), 1);
        assert_eq!(report.failed().count(), 2);
        assert!(matches!(report.first_error(), Some(Error::Encoding(_))));
    }

    #[test]
    fn test_policy_serde_names() {
        let policy: BatchPolicy = serde_json::from_str("\"continue_on_error\"").unwrap();
        assert_eq!(policy, BatchPolicy::ContinueOnError);
        assert_eq!(BatchPolicy::default(), BatchPolicy::AbortOnFirstError);
    }
}
