//! Store call deadlines
//!
//! Every suspension point that talks to a backing store goes through
//! [`bounded`], so a stalled store surfaces as `Unavailable` instead of
//! pinning a request task forever.

use std::future::Future;
use std::time::Duration;

use kernel::error::store::StoreFailure;

/// Default per-call deadline
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run a store call with a deadline
///
/// The inner error is classified through `Into<StoreFailure>`; an expired
/// deadline becomes [`StoreFailure::Unavailable`]. Dropping the returned
/// future (client disconnect) drops the inner call as well.
pub async fn bounded<F, T, E>(limit: Duration, call: F) -> Result<T, StoreFailure>
where
    F: Future<Output = Result<T, E>>,
    E: Into<StoreFailure>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => {
            tracing::error!(limit_ms = limit.as_millis() as u64, "Store call timed out");
            Err(StoreFailure::deadline_exceeded(limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let result = bounded(Duration::from_millis(100), async {
            Ok::<_, StoreFailure>(7)
        })
        .await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<(), _> = bounded(Duration::from_millis(100), async {
            Err(StoreFailure::NotFound)
        })
        .await;
        assert!(matches!(result, Err(StoreFailure::NotFound)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_deadline_is_unavailable() {
        let result = bounded(Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, StoreFailure>(())
        })
        .await;
        assert!(result.unwrap_err().is_unavailable());
    }
}
