//! Tiered policy resolution
//!
//! Resolves each retry-policy field independently with strict precedence:
//! 1. Explicit suite parameter, if present and parseable
//! 2. Process-wide environment override (`RETRY_*`), if present and parseable
//! 3. Hardcoded default
//!
//! Malformed values at tier 1 or 2 are logged and treated as absent; the
//! chain falls through and resolution never fails. Negative numerics always
//! mean "inherit from the next source", never "unlimited".

use std::env;

use crate::types::RetryPolicy;

/// Environment variable carrying the max-retries override
pub const ENV_MAX_RETRIES: &str = "RETRY_MAX_RETRIES";
/// Environment variable carrying the inter-retry delay override, in seconds
pub const ENV_DELAY: &str = "RETRY_DELAY";
/// Environment variable carrying the retry-enabled override
pub const ENV_ENABLED: &str = "RETRY_ENABLED";
/// Environment variable carrying the profile-name override
pub const ENV_CONFIG_NAME: &str = "RETRY_CONFIG_NAME";
/// Environment variable carrying the profile-file-path override
pub const ENV_CONFIG_FILE: &str = "RETRY_CONFIG_FILE";

/// Suite-start parameters supplied by the host runner
///
/// String-typed because suite files carry untyped values; absent or malformed
/// entries fall through to the environment tier. Threaded explicitly through
/// suite start, never read from ambient global state.
#[derive(Debug, Clone, Default)]
pub struct SuiteParams {
    /// `maxRetriesFromSuite` suite parameter
    pub max_retries: Option<String>,
    /// `delayBetweenRetryInSeconds` suite parameter
    pub delay_secs: Option<String>,
    /// `retryEnabled` suite parameter
    pub enabled: Option<String>,
    /// `retryConfigName` suite parameter
    pub config_name: Option<String>,
    /// `retryConfigFile` suite parameter
    pub config_file: Option<String>,
}

impl SuiteParams {
    /// Parameters with every field absent (resolution uses lower tiers)
    pub fn none() -> Self {
        Self::default()
    }
}

/// Snapshot of the process-wide retry overrides
///
/// Captured once at suite start via [`EnvOverrides::from_env`]; tests can
/// construct the snapshot directly instead of mutating the process
/// environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// `RETRY_MAX_RETRIES`
    pub max_retries: Option<String>,
    /// `RETRY_DELAY`
    pub delay_secs: Option<String>,
    /// `RETRY_ENABLED`
    pub enabled: Option<String>,
    /// `RETRY_CONFIG_NAME`
    pub config_name: Option<String>,
    /// `RETRY_CONFIG_FILE`
    pub config_file: Option<String>,
}

impl EnvOverrides {
    /// Capture the `RETRY_*` overrides from the process environment
    pub fn from_env() -> Self {
        Self {
            max_retries: env::var(ENV_MAX_RETRIES).ok(),
            delay_secs: env::var(ENV_DELAY).ok(),
            enabled: env::var(ENV_ENABLED).ok(),
            config_name: env::var(ENV_CONFIG_NAME).ok(),
            config_file: env::var(ENV_CONFIG_FILE).ok(),
        }
    }

    /// A snapshot with no overrides set
    pub fn none() -> Self {
        Self::default()
    }
}

/// Resolve the effective suite policy from suite parameters and environment
///
/// Pure function: no side effects beyond logging, safe to call repeatedly and
/// concurrently.
pub fn resolve_policy(params: &SuiteParams, env: &EnvOverrides) -> RetryPolicy {
    let defaults = RetryPolicy::default();

    RetryPolicy {
        max_retries: resolve_u32(
            "max_retries",
            params.max_retries.as_deref(),
            env.max_retries.as_deref(),
            defaults.max_retries,
        ),
        delay_secs: resolve_u64(
            "delay_secs",
            params.delay_secs.as_deref(),
            env.delay_secs.as_deref(),
            defaults.delay_secs,
        ),
        enabled: resolve_bool(
            "enabled",
            params.enabled.as_deref(),
            env.enabled.as_deref(),
            defaults.enabled,
        ),
        config_name: resolve_string(
            params.config_name.as_deref(),
            env.config_name.as_deref(),
            &defaults.config_name,
        ),
    }
}

/// Resolve the profile-file path, if any source names one
pub fn resolve_profile_path(params: &SuiteParams, env: &EnvOverrides) -> Option<String> {
    present(params.config_file.as_deref())
        .or_else(|| present(env.config_file.as_deref()))
        .map(str::to_string)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn resolve_u32(field: &str, suite: Option<&str>, env: Option<&str>, default: u32) -> u32 {
    resolve_numeric(field, suite, env)
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or_else(|| {
            tracing::debug!(field, value = default, "using default");
            default
        })
}

fn resolve_u64(field: &str, suite: Option<&str>, env: Option<&str>, default: u64) -> u64 {
    resolve_numeric(field, suite, env).unwrap_or_else(|| {
        tracing::debug!(field, value = default, "using default");
        default
    })
}

/// Shared numeric chain: signed parse so negative values can be rejected as
/// "inherit" rather than wrapping or meaning "unlimited".
fn resolve_numeric(field: &str, suite: Option<&str>, env: Option<&str>) -> Option<u64> {
    if let Some(raw) = present(suite) {
        match raw.parse::<i64>() {
            Ok(value) if value >= 0 => {
                tracing::debug!(field, value, "using suite parameter");
                return Some(value as u64);
            }
            Ok(value) => {
                tracing::warn!(field, value, "negative suite parameter, falling through");
            }
            Err(_) => {
                tracing::warn!(field, raw, "unparseable suite parameter, falling through");
            }
        }
    }

    if let Some(raw) = present(env) {
        match raw.parse::<i64>() {
            Ok(value) if value >= 0 => {
                tracing::debug!(field, value, "using environment override");
                return Some(value as u64);
            }
            Ok(value) => {
                tracing::warn!(field, value, "negative environment override, falling through");
            }
            Err(_) => {
                tracing::warn!(field, raw, "unparseable environment override, falling through");
            }
        }
    }

    None
}

fn resolve_bool(field: &str, suite: Option<&str>, env: Option<&str>, default: bool) -> bool {
    for (source, raw) in [("suite parameter", suite), ("environment override", env)] {
        if let Some(raw) = present(raw) {
            match raw.to_ascii_lowercase().parse::<bool>() {
                Ok(value) => {
                    tracing::debug!(field, value, source, "resolved");
                    return value;
                }
                Err(_) => {
                    tracing::warn!(field, raw, source, "unparseable boolean, falling through");
                }
            }
        }
    }

    tracing::debug!(field, value = default, "using default");
    default
}

fn resolve_string(suite: Option<&str>, env: Option<&str>, default: &str) -> String {
    present(suite)
        .or_else(|| present(env))
        .unwrap_or(default)
        .to_string()
}
