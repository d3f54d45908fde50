//! Bounded-duration calls to external services

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{AgrilokaError, Result};

/// Timeout and retry budget applied to each upstream call
#[derive(Debug, Clone, Copy)]
pub struct CallPolicy {
    pub timeout: Duration,
    /// Extra attempts after the first; clamped to at most one
    pub max_retries: u32,
}

impl CallPolicy {
    pub fn new(timeout: Duration, max_retries: u32) -> Self {
        Self {
            timeout,
            max_retries: max_retries.min(1),
        }
    }
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(20), 1)
    }
}

/// Run `call` under `policy`. Each attempt is dropped when it exceeds the
/// timeout; only transient failures are retried.
pub async fn call_with_policy<T, F, Fut>(
    operation: &str,
    policy: CallPolicy,
    mut call: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = policy.max_retries + 1;
    let mut attempt = 0;
    loop {
        attempt += 1;
        let outcome = match tokio::time::timeout(policy.timeout, call()).await {
            Ok(result) => result,
            Err(_) => Err(AgrilokaError::Timeout {
                operation: operation.to_string(),
                timeout_ms: policy.timeout.as_millis() as u64,
            }),
        };

        match outcome {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < attempts => {
                warn!(operation, attempt, error = %e, "Upstream call failed, retrying");
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn network(msg: &str) -> AgrilokaError {
        AgrilokaError::Network {
            message: msg.to_string(),
        }
    }

    #[test]
    fn policy_clamps_retries_to_one() {
        assert_eq!(CallPolicy::new(Duration::from_secs(1), 5).max_retries, 1);
        assert_eq!(CallPolicy::new(Duration::from_secs(1), 0).max_retries, 0);
    }

    #[tokio::test]
    async fn retries_transient_failure_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let result = call_with_policy("search", CallPolicy::default(), || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(network("connection reset"))
                } else {
                    Ok(42)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_one_retry() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let result: Result<()> = call_with_policy("search", CallPolicy::default(), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(network("down"))
            }
        })
        .await;
        assert!(matches!(result, Err(AgrilokaError::Network { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn does_not_retry_validation_errors() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let result: Result<()> = call_with_policy("search", CallPolicy::default(), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AgrilokaError::Validation {
                    message: "Query is required".into(),
                })
            }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn slow_call_times_out() {
        let policy = CallPolicy::new(Duration::from_millis(20), 0);
        let result: Result<()> = call_with_policy("chat", policy, || async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        match result {
            Err(AgrilokaError::Timeout {
                operation,
                timeout_ms,
            }) => {
                assert_eq!(operation, "chat");
                assert_eq!(timeout_ms, 20);
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
