//! Process-wide retry statistics
//!
//! Counters are plain atomics updated concurrently by every in-flight test.
//! They only ever increase for the lifetime of the process; there is no reset.
//! Share a single instance by handle (`Arc<RetryStats>`) rather than through
//! a global.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global retry counters
#[derive(Debug, Default)]
pub struct RetryStats {
    total_retries: AtomicU64,
    failed_tests: AtomicU64,
    successful_retries: AtomicU64,
}

impl RetryStats {
    /// Create a fresh set of counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one retry attempt being scheduled
    pub fn record_retry(&self) {
        self.total_retries.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a test that exhausted its retries and failed permanently
    pub fn record_permanent_failure(&self) {
        self.failed_tests.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a retried test that eventually passed
    pub fn record_successful_retry(&self) {
        self.successful_retries.fetch_add(1, Ordering::SeqCst);
    }

    /// Total retries performed across all tests
    pub fn total_retries(&self) -> u64 {
        self.total_retries.load(Ordering::SeqCst)
    }

    /// Total tests that ultimately failed
    pub fn total_failed_tests(&self) -> u64 {
        self.failed_tests.load(Ordering::SeqCst)
    }

    /// Total retries that led to an eventual pass
    pub fn total_successful_retries(&self) -> u64 {
        self.successful_retries.load(Ordering::SeqCst)
    }

    /// Retry success rate as a percentage
    ///
    /// Defined as 0.0 when no retries have been performed.
    pub fn success_rate(&self) -> f64 {
        let total = self.total_retries();
        if total == 0 {
            return 0.0;
        }
        self.total_successful_retries() as f64 / total as f64 * 100.0
    }

    /// Render the suite-end summary
    pub fn log_summary(&self) {
        tracing::info!("=== Retry Statistics ===");
        tracing::info!("Total Retries: {}", self.total_retries());
        tracing::info!("Total Failed Tests: {}", self.total_failed_tests());
        tracing::info!("Total Successful Retries: {}", self.total_successful_retries());
        tracing::info!("Retry Success Rate: {:.2}%", self.success_rate());
        tracing::info!("========================");
    }
}
