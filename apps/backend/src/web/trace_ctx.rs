//! Task-local request context for web requests.
//!
//! This module provides a minimal API for accessing the current request's
//! trace_id and path from anywhere in the request processing pipeline. It
//! uses Tokio's task-local storage to maintain the context throughout the
//! request lifecycle.
//!
//! This module is part of the web boundary and should not be imported by
//! core/service code to maintain separation of concerns.

use std::cell::RefCell;

use tokio::task_local;

#[derive(Debug, Clone)]
struct RequestCtx {
    trace_id: String,
    path: String,
}

task_local! {
    static REQUEST_CTX: RefCell<Option<RequestCtx>>;
}

/// Get the trace_id for the current task.
/// Returns "unknown" if no context is set (e.g., outside of a request).
pub fn trace_id() -> String {
    REQUEST_CTX
        .try_with(|cell| {
            cell.borrow()
                .as_ref()
                .map(|ctx| ctx.trace_id.clone())
                .unwrap_or_else(|| "unknown".to_string())
        })
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Get the request path for the current task.
/// Returns "unknown" if no context is set.
pub fn path() -> String {
    REQUEST_CTX
        .try_with(|cell| {
            cell.borrow()
                .as_ref()
                .map(|ctx| ctx.path.clone())
                .unwrap_or_else(|| "unknown".to_string())
        })
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run a future within a request context.
/// This is used by middleware to establish the task-local scope.
pub async fn with_request_ctx<F, R>(trace_id: String, path: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    REQUEST_CTX
        .scope(RefCell::new(Some(RequestCtx { trace_id, path })), future)
        .await
}
