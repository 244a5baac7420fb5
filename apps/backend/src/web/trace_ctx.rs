//! Task-local trace context for web requests.
//!
//! `RequestTrace` opens the scope; anything awaited inside it (handlers,
//! extractors, the auth gate, error rendering) can read the id without
//! threading it through signatures.

use tokio::task_local;

const UNKNOWN: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Trace id of the current request, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

/// Run `future` with `trace_id` installed as the current trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trace_id_outside_context() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn test_trace_id_scoped_to_future() {
        let result = with_trace_id("trace-abc".to_string(), async {
            assert_eq!(trace_id(), "trace-abc");
            7
        })
        .await;

        assert_eq!(result, 7);
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn test_nested_scopes_restore_outer() {
        with_trace_id("outer".to_string(), async {
            with_trace_id("inner".to_string(), async {
                assert_eq!(trace_id(), "inner");
            })
            .await;
            assert_eq!(trace_id(), "outer");
        })
        .await;
    }
}
