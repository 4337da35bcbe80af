//! Request lifecycle observation hooks
//!
//! The observation contract the harness exposes to request-level
//! collaborators (the HTTP wrapper lives outside this crate). Every method
//! defaults to a no-op, so implementors override only the events they care
//! about. Hooks observe; they can never alter the decision engine's verdict.

use std::fmt;
use std::sync::Arc;

/// HTTP method kind of the request being observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Context describing the request being observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Human-readable description of the request
    pub description: String,
    /// Endpoint the request targets
    pub endpoint: String,
}

impl RequestContext {
    /// Create a request context
    pub fn new(description: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// Observer for request lifecycle events
///
/// Attempt numbers are 1-indexed: attempt 1 is the original request, attempt
/// k > 1 is the (k-1)th retry.
pub trait RequestHooks: Send + Sync {
    /// Called before a request is executed
    fn before_request(&self, method: MethodKind, ctx: &RequestContext) {
        let _ = (method, ctx);
    }

    /// Called after a successful request
    fn on_success(&self, method: MethodKind, ctx: &RequestContext, attempt: u32) {
        let _ = (method, ctx, attempt);
    }

    /// Called after a failed request, before any retry
    fn on_failure(&self, method: MethodKind, ctx: &RequestContext, error: &str, attempt: u32) {
        let _ = (method, ctx, error, attempt);
    }

    /// Called before a retry attempt
    fn before_retry(
        &self,
        method: MethodKind,
        ctx: &RequestContext,
        previous_error: &str,
        retry_attempt: u32,
        max_retries: u32,
    ) {
        let _ = (method, ctx, previous_error, retry_attempt, max_retries);
    }

    /// Called when all retry attempts have been exhausted
    fn on_retry_exhausted(
        &self,
        method: MethodKind,
        ctx: &RequestContext,
        final_error: &str,
        total_attempts: u32,
    ) {
        let _ = (method, ctx, final_error, total_attempts);
    }
}

/// A hooks implementation that observes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpHooks;

impl RequestHooks for NoOpHooks {}

/// Hooks that log every lifecycle event via `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHooks;

impl RequestHooks for TracingHooks {
    fn before_request(&self, method: MethodKind, ctx: &RequestContext) {
        tracing::debug!(%method, endpoint = %ctx.endpoint, "sending request");
    }

    fn on_success(&self, method: MethodKind, ctx: &RequestContext, attempt: u32) {
        if attempt > 1 {
            tracing::info!(%method, endpoint = %ctx.endpoint, attempt, "request succeeded after retry");
        } else {
            tracing::debug!(%method, endpoint = %ctx.endpoint, "request succeeded");
        }
    }

    fn on_failure(&self, method: MethodKind, ctx: &RequestContext, error: &str, attempt: u32) {
        tracing::warn!(%method, endpoint = %ctx.endpoint, error, attempt, "request failed");
    }

    fn before_retry(
        &self,
        method: MethodKind,
        ctx: &RequestContext,
        previous_error: &str,
        retry_attempt: u32,
        max_retries: u32,
    ) {
        tracing::warn!(
            %method,
            endpoint = %ctx.endpoint,
            error = previous_error,
            retry_attempt,
            max_retries,
            "retrying request"
        );
    }

    fn on_retry_exhausted(
        &self,
        method: MethodKind,
        ctx: &RequestContext,
        final_error: &str,
        total_attempts: u32,
    ) {
        tracing::error!(
            %method,
            endpoint = %ctx.endpoint,
            error = final_error,
            total_attempts,
            "request retries exhausted"
        );
    }
}

/// Forward hook events through a shared handle
impl<T: RequestHooks + ?Sized> RequestHooks for Arc<T> {
    fn before_request(&self, method: MethodKind, ctx: &RequestContext) {
        (**self).before_request(method, ctx)
    }

    fn on_success(&self, method: MethodKind, ctx: &RequestContext, attempt: u32) {
        (**self).on_success(method, ctx, attempt)
    }

    fn on_failure(&self, method: MethodKind, ctx: &RequestContext, error: &str, attempt: u32) {
        (**self).on_failure(method, ctx, error, attempt)
    }

    fn before_retry(
        &self,
        method: MethodKind,
        ctx: &RequestContext,
        previous_error: &str,
        retry_attempt: u32,
        max_retries: u32,
    ) {
        (**self).before_retry(method, ctx, previous_error, retry_attempt, max_retries)
    }

    fn on_retry_exhausted(
        &self,
        method: MethodKind,
        ctx: &RequestContext,
        final_error: &str,
        total_attempts: u32,
    ) {
        (**self).on_retry_exhausted(method, ctx, final_error, total_attempts)
    }
}
