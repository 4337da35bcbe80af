//! Suite lifecycle listener
//!
//! Implements the callback contract the host runner drives: policy resolution
//! at suite start, the attach-or-skip decision per discovered test, outcome
//! handling with the inter-retry delay, and the end-of-suite summary.

use std::sync::Arc;

use brokkr_core::config::{resolve_policy, resolve_profile_path, EnvOverrides, SuiteParams};
use brokkr_core::{ProfileFile, RetryPolicy};

use crate::engine::RetryEngine;
use crate::outcome::{FinalStatus, TestId, TestOutcome, Verdict};
use crate::registry::{Attachment, ScopeRegistry};
use crate::stats::RetryStats;

/// Retry listener wired into the host runner's suite lifecycle
///
/// Construct once, register scope overrides, then hand the callbacks to the
/// runner. `on_suite_start` must run before any test outcome is reported;
/// outcome handling is safe from any number of parallel workers.
#[derive(Debug)]
pub struct RetryListener {
    registry: Arc<ScopeRegistry>,
    stats: Arc<RetryStats>,
    engine: RetryEngine,
}

impl RetryListener {
    /// Create a listener with no scope overrides and default policy
    pub fn new() -> Self {
        Self::with_registry(ScopeRegistry::new())
    }

    /// Create a listener with a populated scope-override registry
    pub fn with_registry(registry: ScopeRegistry) -> Self {
        let registry = Arc::new(registry);
        let stats = Arc::new(RetryStats::new());
        let engine = RetryEngine::new(
            RetryPolicy::default(),
            Arc::clone(&registry),
            Arc::clone(&stats),
        );
        Self {
            registry,
            stats,
            engine,
        }
    }

    /// Suite-start callback: resolve the effective policy
    ///
    /// Captures the process environment, applies the tiered resolution, and
    /// refines the result with the named profile file if one is configured.
    pub fn on_suite_start(&mut self, params: SuiteParams) {
        self.on_suite_start_with_env(params, EnvOverrides::from_env());
    }

    /// Suite-start with an explicit environment snapshot (test seam)
    pub fn on_suite_start_with_env(&mut self, params: SuiteParams, env: EnvOverrides) {
        let mut policy = resolve_policy(&params, &env);

        if let Some(path) = resolve_profile_path(&params, &env) {
            match ProfileFile::load(&path) {
                Ok(profiles) => policy = profiles.apply(policy),
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "could not load retry profiles, continuing");
                }
            }
        }

        tracing::info!(
            max_retries = policy.max_retries,
            delay_secs = policy.delay_secs,
            enabled = policy.enabled,
            config_name = %policy.config_name,
            "retry policy resolved"
        );

        self.engine = RetryEngine::new(
            policy,
            Arc::clone(&self.registry),
            Arc::clone(&self.stats),
        );
    }

    /// Discovery callback: attach the analyzer or skip the test
    pub fn on_test_discovered(&self, test: &TestId) -> Attachment {
        self.registry.attachment_for(test)
    }

    /// Outcome callback: decide retry or finalize
    ///
    /// On a retry verdict, the effective delay is awaited here, on the
    /// calling worker task, with no lock held; other tests keep making
    /// progress. Tests whose scope opted out of retries are finalized on
    /// their first outcome and never touch the statistics.
    pub async fn on_test_outcome(&self, test: &TestId, outcome: TestOutcome) -> Verdict {
        if self.on_test_discovered(test) == Attachment::Skip {
            return Verdict::Finalize(match outcome {
                TestOutcome::Passed => FinalStatus::Passed,
                TestOutcome::Failed(_) => FinalStatus::Failed { attempts: 1 },
            });
        }

        let verdict = self.engine.decide(test, &outcome);
        if let Verdict::Retry { delay, .. } = &verdict {
            if !delay.is_zero() {
                tokio::time::sleep(*delay).await;
            }
        }
        verdict
    }

    /// Suite-end callback: log the summary and drop per-test tracking
    pub fn on_suite_end(&self) {
        self.stats.log_summary();
        self.engine.clear_attempts();
    }

    /// The resolved suite policy
    pub fn policy(&self) -> &RetryPolicy {
        self.engine.policy()
    }

    /// Shared statistics handle
    pub fn stats(&self) -> &Arc<RetryStats> {
        &self.stats
    }
}

impl Default for RetryListener {
    fn default() -> Self {
        Self::new()
    }
}
