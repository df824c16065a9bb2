//! Bounded async operations.
//!
//! Every outbound call goes through [`bounded`], which races the call against
//! a timer and reports [`TimedOut`] through the caller's own error type when
//! the timer wins.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// The operation did not finish within its time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Timed out after {}ms", .0.as_millis())]
pub struct TimedOut(pub Duration);

/// Run `operation`, failing with `TimedOut(limit)` if it has not completed
/// after `limit`.
pub async fn bounded<F, T, E>(limit: Duration, operation: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<TimedOut>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => Err(TimedOut(limit).into()),
    }
}
