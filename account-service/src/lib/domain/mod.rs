pub mod errors;
pub mod token;
pub mod user;

use crate::domain::errors::AuthError;

/// Run CPU-bound work (password and fingerprint hashing) off the async workers.
pub(crate) async fn run_blocking<F, T>(task: F) -> Result<T, AuthError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        tracing::error!(error = %e, "Blocking task failed");
        AuthError::Internal(e.to_string())
    })
}
