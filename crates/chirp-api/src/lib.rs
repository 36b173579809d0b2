pub mod auth;
pub mod error;
pub mod messages;
pub mod router;
pub mod services;

use crate::error::ApiError;

pub use auth::{AppState, AppStateInner};
pub use router::build_router;

/// Run a synchronous service call on the blocking pool so SQLite never
/// stalls the async runtime.
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Storage(anyhow::Error::from(e).context("spawn_blocking join error")))?
}
