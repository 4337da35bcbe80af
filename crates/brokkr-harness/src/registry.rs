//! Per-scope override registration and the attach-or-skip decision
//!
//! Overrides attach to a test class or an individual method. Registration
//! happens once, before the suite runs; lookups during the run are read-only.
//! A method-level override takes precedence over its class-level one.

use std::collections::HashMap;

use brokkr_core::ScopeOverride;

use crate::outcome::TestId;

/// A scope an override can attach to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every test method in a class
    Class(String),
    /// A single test method
    Method {
        /// Declaring class
        class: String,
        /// Method name
        method: String,
    },
}

impl Scope {
    /// Class-level scope
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Method-level scope
    pub fn method(class: impl Into<String>, method: impl Into<String>) -> Self {
        Self::Method {
            class: class.into(),
            method: method.into(),
        }
    }
}

/// Decision made once per discovered test, before any execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Wire the retry engine to this test
    Analyzer,
    /// Leave the test unwired; it runs exactly once regardless of outcome
    Skip,
}

/// Registration table mapping scopes to retry overrides
#[derive(Debug, Default)]
pub struct ScopeRegistry {
    overrides: HashMap<Scope, ScopeOverride>,
}

impl ScopeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override for a scope
    ///
    /// Registering the same scope twice replaces the earlier override.
    pub fn register(&mut self, scope: Scope, scope_override: ScopeOverride) {
        self.overrides.insert(scope, scope_override);
    }

    /// Number of registered overrides
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Look up the override governing a test, method scope first
    pub fn lookup(&self, test: &TestId) -> Option<&ScopeOverride> {
        let method_scope = Scope::Method {
            class: test.class.clone(),
            method: test.method.clone(),
        };
        self.overrides
            .get(&method_scope)
            .or_else(|| self.overrides.get(&Scope::Class(test.class.clone())))
    }

    /// The transformer decision for a discovered test
    ///
    /// Idempotent, no I/O: `Skip` only when the governing override disables
    /// retries; every other test gets the analyzer.
    pub fn attachment_for(&self, test: &TestId) -> Attachment {
        match self.lookup(test) {
            Some(scope_override) if !scope_override.enabled => {
                tracing::debug!(test = %test, "retries disabled for scope, skipping analyzer");
                Attachment::Skip
            }
            _ => Attachment::Analyzer,
        }
    }
}
