//! Task-local trace id for the request being handled.
//!
//! `RequestTrace` runs each request inside [`with_trace_id`], so error
//! responses built anywhere below it can stamp the same id without the
//! request at hand.

use tokio::task_local;

/// Response header carrying the trace id.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

const UNKNOWN: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id stored in request extensions by `RequestTrace`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceId(pub String);

/// Trace id of the current task, or `"unknown"` outside a request.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

#[cfg(test)]
mod tests {
    use super::{trace_id, with_trace_id};

    #[tokio::test]
    async fn outside_scope_is_unknown() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn inner_scope_shadows_outer() {
        let seen = with_trace_id("outer".to_string(), async {
            let inner = with_trace_id("inner".to_string(), async { trace_id() }).await;
            (inner, trace_id())
        })
        .await;

        assert_eq!(seen, ("inner".to_string(), "outer".to_string()));
        assert_eq!(trace_id(), "unknown");
    }
}
