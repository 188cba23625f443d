//! Deadline and span wrapper for storage calls.

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;
use tracing::Instrument;

use common::{AppError, AppResult};

/// Run `operation` under `deadline` inside a span named after it.
///
/// When the deadline elapses the inner future is dropped, which abandons the
/// in-flight statement, and the call reports `AppError::Timeout`.
pub async fn with_deadline<F, T>(
    name: &'static str,
    deadline: Duration,
    operation: F,
) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    let span = tracing::info_span!("storage", operation = name);

    async move {
        match timeout(deadline, operation).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                if err.is_missing() {
                    tracing::debug!(code = err.code(), "no live row matched");
                } else {
                    tracing::warn!(
                        code = err.code(),
                        retryable = err.is_retryable(),
                        error = ?err,
                        "operation failed"
                    );
                }
                Err(err)
            }
            Err(_) => {
                tracing::warn!(deadline_ms = deadline.as_millis() as u64, "deadline elapsed");
                Err(AppError::timeout(name))
            }
        }
    }
    .instrument(span)
    .await
}
