//! Retry configuration resolution
//!
//! Policy values come from three prioritized sources: explicit suite
//! parameters, process-wide environment overrides, and hardcoded defaults.
//! A named profile file can then refine the numeric fields.

mod profiles;
mod resolver;

pub use profiles::{ProfileFile, RetryProfile};
pub use resolver::{
    resolve_policy, resolve_profile_path, EnvOverrides, SuiteParams, ENV_CONFIG_FILE,
    ENV_CONFIG_NAME, ENV_DELAY, ENV_ENABLED, ENV_MAX_RETRIES,
};
