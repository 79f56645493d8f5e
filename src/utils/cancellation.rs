//! Cooperative cancellation for request-scoped I/O.

use std::future::Future;

use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::AppError;

/// Awaits `fut` unless `token` fires first.
///
/// The inner future is dropped on cancellation, which releases any pooled
/// connection it was holding.
///
/// # Errors
///
/// Returns [`AppError::Cancelled`] if the token is or becomes cancelled.
pub async fn with_cancellation<F>(token: &CancellationToken, fut: F) -> Result<F::Output, AppError>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(AppError::cancelled()),
        output = fut => Ok(output),
    }
}

/// Creates a token that is cancelled when the returned guard is dropped.
///
/// Handlers keep the guard alive for the duration of the request; axum drops
/// the handler future when the client goes away, which drops the guard.
pub fn request_token() -> (CancellationToken, DropGuard) {
    let token = CancellationToken::new();
    let guard = token.clone().drop_guard();
    (token, guard)
}
