//! Integration tests for retry configuration resolution
//!
//! Tests cover:
//! - Tiered priority (suite parameter > environment override > default)
//! - Parse-failure fallthrough at each tier
//! - Success-rate arithmetic
//! - Profile-file selection via config name and file path
//! - Environment snapshot capture at suite start

use std::io::Write;

use anyhow::Result;
use brokkr_core::config::{resolve_policy, EnvOverrides, SuiteParams, ENV_DELAY, ENV_MAX_RETRIES};
use brokkr_core::{RetryPolicy, ScopeOverride};
use brokkr_harness::{RetryListener, RetryStats, Scope, ScopeRegistry, TestId};
use serial_test::serial;
use tempfile::NamedTempFile;

fn suite(max_retries: Option<&str>) -> SuiteParams {
    SuiteParams {
        max_retries: max_retries.map(str::to_string),
        ..SuiteParams::none()
    }
}

fn env(max_retries: Option<&str>) -> EnvOverrides {
    EnvOverrides {
        max_retries: max_retries.map(str::to_string),
        ..EnvOverrides::none()
    }
}

#[test]
fn suite_parameter_beats_environment() {
    let policy = resolve_policy(&suite(Some("5")), &env(Some("2")));
    assert_eq!(policy.max_retries, 5);
}

#[test]
fn malformed_suite_parameter_falls_to_environment() {
    let policy = resolve_policy(&suite(Some("bad")), &env(Some("2")));
    assert_eq!(policy.max_retries, 2);
}

#[test]
fn absent_sources_use_defaults() {
    let policy = resolve_policy(&SuiteParams::none(), &EnvOverrides::none());
    assert_eq!(policy, RetryPolicy::default());
    assert_eq!(policy.max_retries, 3);
    assert_eq!(policy.delay_secs, 2);
    assert!(policy.enabled);
    assert_eq!(policy.config_name, "default");
}

#[test]
fn malformed_environment_falls_to_default() {
    let policy = resolve_policy(&SuiteParams::none(), &env(Some("two")));
    assert_eq!(policy.max_retries, 3);
}

#[test]
fn success_rate_arithmetic() {
    let stats = RetryStats::new();
    assert_eq!(stats.success_rate(), 0.0);

    for _ in 0..4 {
        stats.record_retry();
    }
    stats.record_successful_retry();
    assert_eq!(stats.success_rate(), 25.0);
}

#[tokio::test]
async fn profile_selected_by_name_and_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(
        br#"
profiles:
  default:
    max-retries: 3
    delay-secs: 2
  soak:
    max-retries: 6
    delay-secs: 0
"#,
    )?;

    let params = SuiteParams {
        config_name: Some("soak".to_string()),
        config_file: Some(file.path().display().to_string()),
        ..SuiteParams::none()
    };

    let mut listener = RetryListener::new();
    listener.on_suite_start_with_env(params, EnvOverrides::none());

    assert_eq!(listener.policy().max_retries, 6);
    assert_eq!(listener.policy().delay_secs, 0);
    assert_eq!(listener.policy().config_name, "soak");
    Ok(())
}

#[tokio::test]
async fn unknown_profile_keeps_tier_resolved_policy() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"profiles: {}\n")?;

    let params = SuiteParams {
        max_retries: Some("2".to_string()),
        config_name: Some("ghost".to_string()),
        config_file: Some(file.path().display().to_string()),
        ..SuiteParams::none()
    };

    let mut listener = RetryListener::new();
    listener.on_suite_start_with_env(params, EnvOverrides::none());

    assert_eq!(listener.policy().max_retries, 2);
    assert_eq!(listener.policy().config_name, "ghost");
    Ok(())
}

#[test]
fn scope_override_inherit_semantics() {
    let policy = RetryPolicy::default();

    let partial = ScopeOverride::inherit().with_delay_secs(0);
    let effective = policy.with_override(&partial);
    assert_eq!(effective.max_retries, 3);
    assert_eq!(effective.delay_secs, 0);

    let mut registry = ScopeRegistry::new();
    registry.register(Scope::class("Suite"), partial);
    let found = registry
        .lookup(&TestId::new("Suite", "case"))
        .expect("class override");
    assert_eq!(found.delay_secs, Some(0));
    assert_eq!(found.max_retries, None);
}

#[test]
#[serial]
fn environment_snapshot_captured_at_suite_start() {
    std::env::set_var(ENV_MAX_RETRIES, "7");
    std::env::set_var(ENV_DELAY, "0");

    let mut listener = RetryListener::new();
    listener.on_suite_start(SuiteParams::none());
    assert_eq!(listener.policy().max_retries, 7);
    assert_eq!(listener.policy().delay_secs, 0);

    // Later environment changes do not move an already-resolved policy.
    std::env::set_var(ENV_MAX_RETRIES, "1");
    assert_eq!(listener.policy().max_retries, 7);

    std::env::remove_var(ENV_MAX_RETRIES);
    std::env::remove_var(ENV_DELAY);
}
