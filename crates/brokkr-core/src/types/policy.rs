//! Retry policy types
//!
//! `RetryPolicy` is the effective suite-wide policy, computed once at suite
//! start and read-only for the rest of the run. `ScopeOverride` narrows or
//! disables that policy for a single test class or method.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Effective retry policy for a suite run
///
/// Immutable snapshot: every test invocation in a run reads the same policy
/// unless a [`ScopeOverride`] is registered for its scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between attempts, in whole seconds
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,

    /// Whether retries are enabled at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Name of the retry profile this policy was resolved from
    #[serde(default = "default_config_name")]
    pub config_name: String,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            delay_secs: default_delay_secs(),
            enabled: default_enabled(),
            config_name: default_config_name(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}
fn default_delay_secs() -> u64 {
    2
}
fn default_enabled() -> bool {
    true
}
fn default_config_name() -> String {
    "default".to_string()
}

impl RetryPolicy {
    /// Delay between attempts as a [`Duration`]
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    /// Apply a per-scope override, producing the effective policy for that scope
    ///
    /// Fields the override leaves unset inherit from `self`.
    pub fn with_override(&self, scope: &ScopeOverride) -> RetryPolicy {
        RetryPolicy {
            max_retries: scope.max_retries.unwrap_or(self.max_retries),
            delay_secs: scope.delay_secs.unwrap_or(self.delay_secs),
            enabled: scope.enabled && self.enabled,
            config_name: scope
                .config_name
                .clone()
                .unwrap_or_else(|| self.config_name.clone()),
        }
    }
}

/// Per-scope retry override
///
/// Attachable to a test class or an individual test method. Unset fields
/// (`None`) defer to the suite policy; `enabled = false` opts the scope out of
/// retries entirely, so its tests run exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeOverride {
    /// Whether retries are enabled for this scope
    pub enabled: bool,

    /// Maximum retries for this scope, if overridden
    pub max_retries: Option<u32>,

    /// Delay between retries for this scope, if overridden
    pub delay_secs: Option<u64>,

    /// Named retry profile for this scope, if overridden
    pub config_name: Option<String>,
}

impl Default for ScopeOverride {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: None,
            delay_secs: None,
            config_name: None,
        }
    }
}

impl ScopeOverride {
    /// An override that inherits everything from the suite policy
    pub fn inherit() -> Self {
        Self::default()
    }

    /// An override that disables retries for the scope
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Set the maximum retries for this scope
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Set the delay between retries for this scope
    pub fn with_delay_secs(mut self, delay_secs: u64) -> Self {
        self.delay_secs = Some(delay_secs);
        self
    }

    /// Set the named retry profile for this scope
    pub fn with_config_name(mut self, name: impl Into<String>) -> Self {
        self.config_name = Some(name.into());
        self
    }
}
