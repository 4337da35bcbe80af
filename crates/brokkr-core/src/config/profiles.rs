//! Named retry profiles
//!
//! A profile file lets a suite ship several named retry configurations and
//! select one by `config_name` without editing suite parameters:
//!
//! ```yaml
//! profiles:
//!   default:
//!     max-retries: 3
//!     delay-secs: 2
//!   aggressive:
//!     max-retries: 5
//!     delay-secs: 1
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::RetryPolicy;

/// A single named retry profile
///
/// Unset fields inherit from the tier-resolved policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryProfile {
    /// Maximum retries for this profile
    #[serde(default)]
    pub max_retries: Option<u32>,

    /// Delay between retries in seconds for this profile
    #[serde(default)]
    pub delay_secs: Option<u64>,
}

/// A parsed retry-profile file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProfileFile {
    /// Profiles by name
    #[serde(default)]
    pub profiles: HashMap<String, RetryProfile>,
}

impl ProfileFile {
    /// Load a profile file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::profile_file_not_found(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let file: ProfileFile = serde_yaml_ng::from_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            profiles = file.profiles.len(),
            "loaded retry profiles"
        );
        Ok(file)
    }

    /// Look up a profile by name
    pub fn get(&self, name: &str) -> Result<&RetryProfile> {
        self.profiles
            .get(name)
            .ok_or_else(|| Error::profile_not_found(name))
    }

    /// Refine a tier-resolved policy with the profile it names
    ///
    /// An unknown profile name is logged and ignored; resolution must never
    /// abort on configuration problems.
    pub fn apply(&self, policy: RetryPolicy) -> RetryPolicy {
        match self.get(&policy.config_name) {
            Ok(profile) => RetryPolicy {
                max_retries: profile.max_retries.unwrap_or(policy.max_retries),
                delay_secs: profile.delay_secs.unwrap_or(policy.delay_secs),
                ..policy
            },
            Err(_) => {
                tracing::warn!(
                    config_name = %policy.config_name,
                    "retry profile not found, keeping resolved policy"
                );
                policy
            }
        }
    }
}
