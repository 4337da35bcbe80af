//! Test identity, attempt outcomes, and engine verdicts

use std::fmt;
use std::time::Duration;

/// Identity of a test method within its declaring class
///
/// The engine keys all per-test state by this identity, so parallel tests
/// never share an attempt counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestId {
    /// Declaring test class
    pub class: String,
    /// Test method name
    pub method: String,
}

impl TestId {
    /// Create a test identity
    pub fn new(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            method: method.into(),
        }
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.class, self.method)
    }
}

/// Outcome of a single test attempt, as reported by the host runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    /// The attempt passed
    Passed,
    /// The attempt failed, with the failure message
    Failed(String),
}

impl TestOutcome {
    /// Convenience constructor for a failed attempt
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Whether this outcome is a pass
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Terminal status of a test invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalStatus {
    /// Passed on the first attempt
    Passed,
    /// Passed after one or more retries
    PassedAfterRetry {
        /// Total attempts made, including the passing one
        attempts: u32,
    },
    /// Failed permanently after exhausting retries
    Failed {
        /// Total attempts made
        attempts: u32,
    },
}

impl FinalStatus {
    /// Whether the test ultimately failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Total attempts made before this status was reached
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Passed => 1,
            Self::PassedAfterRetry { attempts } | Self::Failed { attempts } => *attempts,
        }
    }
}

/// Engine verdict for a completed attempt
///
/// `Retry` tells the runner to re-execute the same test; `Finalize` reports
/// the terminal status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Re-execute the test
    Retry {
        /// The attempt number the re-execution will be
        attempt: u32,
        /// Delay to observe before the next attempt
        delay: Duration,
    },
    /// The test reached a terminal status
    Finalize(FinalStatus),
}

impl Verdict {
    /// Whether the runner should re-execute the test
    pub fn is_retry(&self) -> bool {
        matches!(self, Self::Retry { .. })
    }

    /// Terminal status, if this verdict is final
    pub fn final_status(&self) -> Option<FinalStatus> {
        match self {
            Self::Finalize(status) => Some(*status),
            Self::Retry { .. } => None,
        }
    }
}
