//! # brokkr-core
//!
//! Core library for the Brokkr test-retry harness providing:
//! - Retry policy types and per-scope overrides
//! - Tiered configuration resolution (suite parameters, environment, defaults)
//! - Named retry profiles loaded from a YAML file

pub mod config;
pub mod error;
pub mod types;

pub use config::{resolve_policy, resolve_profile_path, EnvOverrides, ProfileFile, SuiteParams};
pub use error::{Error, Result};
pub use types::{RetryPolicy, ScopeOverride};
