//! Type definitions for retry policies and per-scope overrides

mod policy;

pub use policy::{RetryPolicy, ScopeOverride};
