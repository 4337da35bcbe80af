//! # brokkr-harness
//!
//! Test-retry orchestration on top of a host test runner. The runner owns
//! discovery, scheduling, and lifecycle callbacks; this crate implements the
//! callback contracts:
//!
//! - [`RetryListener`] — suite lifecycle wiring (start, per-test attach,
//!   outcome handling, end-of-suite summary)
//! - [`RetryEngine`] — the per-test pass/fail/retry state machine
//! - [`ScopeRegistry`] — per-class/per-method retry overrides and the
//!   attach-or-skip transformer decision
//! - [`RetryStats`] — process-wide retry counters, safe under concurrent
//!   test execution
//! - [`RequestHooks`] — the observation contract exposed to request-level
//!   collaborators
//!
//! Policy resolution lives in `brokkr-core`; the engine only reads the
//! resolved snapshot.

pub mod engine;
pub mod hooks;
pub mod listener;
pub mod outcome;
pub mod registry;
pub mod stats;

pub use engine::RetryEngine;
pub use hooks::{MethodKind, NoOpHooks, RequestContext, RequestHooks, TracingHooks};
pub use listener::RetryListener;
pub use outcome::{FinalStatus, TestId, TestOutcome, Verdict};
pub use registry::{Attachment, Scope, ScopeRegistry};
pub use stats::RetryStats;
