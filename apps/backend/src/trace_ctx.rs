//! Task-local trace id for the request being handled.
//!
//! `RequestTrace` installs the id around the downstream service future, so
//! anything running inside a handler (notably `AppError::error_response`)
//! can read it without threading it through arguments.

use tokio::task_local;

const UNKNOWN: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or `"unknown"` outside one.
pub fn trace_id() -> String {
    try_trace_id().unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn try_trace_id() -> Option<String> {
    TRACE_ID.try_with(|id| id.clone()).ok()
}

/// Run `future` with `trace_id` installed.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
