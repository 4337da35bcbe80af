//! Retry decision engine
//!
//! The per-test state machine at the heart of the harness. Attempt counts are
//! keyed by test identity, so the engine can be invoked re-entrantly from any
//! number of parallel workers without cross-test interference. The engine
//! never sleeps; the listener owns the inter-retry delay.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use brokkr_core::RetryPolicy;

use crate::outcome::{FinalStatus, TestId, TestOutcome, Verdict};
use crate::registry::ScopeRegistry;
use crate::stats::RetryStats;

/// Per-test retry decision engine
///
/// Holds the immutable suite policy plus shared handles to the scope registry
/// and global statistics. One instance serves the whole suite.
#[derive(Debug)]
pub struct RetryEngine {
    policy: RetryPolicy,
    registry: Arc<ScopeRegistry>,
    stats: Arc<RetryStats>,
    // Attempt counter per in-flight test invocation. Entries are removed on
    // terminal verdicts, so the map only holds tests currently mid-retry.
    attempts: Mutex<HashMap<TestId, u32>>,
}

impl RetryEngine {
    /// Create an engine for a suite run
    pub fn new(policy: RetryPolicy, registry: Arc<ScopeRegistry>, stats: Arc<RetryStats>) -> Self {
        Self {
            policy,
            registry,
            stats,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// The suite-wide policy this engine was built with
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Shared statistics handle
    pub fn stats(&self) -> &Arc<RetryStats> {
        &self.stats
    }

    /// Effective policy for a test, after applying its scope override
    pub fn effective_policy(&self, test: &TestId) -> RetryPolicy {
        match self.registry.lookup(test) {
            Some(scope_override) => self.policy.with_override(scope_override),
            None => self.policy.clone(),
        }
    }

    /// Decide what happens after a completed attempt
    ///
    /// Pure transition function: updates attempt tracking and statistics,
    /// returns the verdict. Safe to call concurrently for distinct tests.
    pub fn decide(&self, test: &TestId, outcome: &TestOutcome) -> Verdict {
        let effective = self.effective_policy(test);

        let mut attempts = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let attempt = *attempts.entry(test.clone()).or_insert(1);

        match outcome {
            TestOutcome::Passed => {
                attempts.remove(test);
                if attempt > 1 {
                    self.stats.record_successful_retry();
                    tracing::info!(test = %test, attempt, "test passed after retry");
                    Verdict::Finalize(FinalStatus::PassedAfterRetry { attempts: attempt })
                } else {
                    Verdict::Finalize(FinalStatus::Passed)
                }
            }
            TestOutcome::Failed(message) => {
                if effective.enabled && attempt <= effective.max_retries {
                    self.stats.record_retry();
                    attempts.insert(test.clone(), attempt + 1);
                    tracing::warn!(
                        test = %test,
                        attempt,
                        max_retries = effective.max_retries,
                        error = %message,
                        "test failed, retry scheduled"
                    );
                    Verdict::Retry {
                        attempt: attempt + 1,
                        delay: effective.delay(),
                    }
                } else {
                    attempts.remove(test);
                    self.stats.record_permanent_failure();
                    tracing::error!(
                        test = %test,
                        attempts = attempt,
                        error = %message,
                        "test failed permanently"
                    );
                    Verdict::Finalize(FinalStatus::Failed { attempts: attempt })
                }
            }
        }
    }

    /// Attempt number the next `decide` call will observe for a test
    pub fn current_attempt(&self, test: &TestId) -> u32 {
        self.attempts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(test)
            .copied()
            .unwrap_or(1)
    }

    /// Discard all per-test attempt tracking
    ///
    /// Called at suite end. Global statistics are untouched.
    pub fn clear_attempts(&self) {
        self.attempts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}
