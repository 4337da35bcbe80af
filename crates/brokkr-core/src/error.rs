//! Error types for brokkr-core

use thiserror::Error;

/// Result type alias using brokkr-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Brokkr
///
/// Tiered policy resolution itself is infallible (bad values fall through to
/// the next source); these errors only surface from the profile-file path.
#[derive(Error, Debug)]
pub enum Error {
    /// Profile file not found
    #[error("Retry profile file not found: {path}")]
    ProfileFileNotFound { path: String },

    /// Named profile missing from the profile file
    #[error("Unknown retry profile: {name}")]
    ProfileNotFound { name: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a profile-file-not-found error
    pub fn profile_file_not_found(path: impl Into<String>) -> Self {
        Self::ProfileFileNotFound { path: path.into() }
    }

    /// Create an unknown-profile error
    pub fn profile_not_found(name: impl Into<String>) -> Self {
        Self::ProfileNotFound { name: name.into() }
    }
}
