//! # HTTP Server
//!
//! Thin JSON boundary over [`VaultService`].
//!
//! Provides endpoints:
//! - `POST /vault/secret/create/` - `{"secret": "<base64>"}` → `{"secret_id": "..."}`
//! - `POST /vault/secret/fetch` - `{"secret_id": "..."}` → `{"secret": "<base64>"}`
//! - `GET /healthz` - Liveness probe (always returns 200)
//!
//! Client errors map to 400/404; every internal error is a generic 500.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

use crate::errors::{Result, VaultError};
use crate::vault::{SecretStore, VaultService};

#[derive(Debug, Deserialize)]
pub struct CreateSecretReq {
    /// Base64 plaintext.
    pub secret: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSecretResp {
    pub secret_id: String,
}

#[derive(Debug, Deserialize)]
pub struct FetchSecretReq {
    pub secret_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FetchSecretResp {
    pub secret: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// A `VaultError` on its way out to an HTTP client.
pub struct ApiError(VaultError);

impl From<VaultError> for ApiError {
    fn from(e: VaultError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            VaultError::InvalidEncoding(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            VaultError::NotFound => (StatusCode::NOT_FOUND, self.0.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Build the router for a shared vault service.
pub fn router<S>(service: Arc<VaultService<S>>) -> Router
where
    S: SecretStore + 'static,
{
    Router::new()
        .route("/vault/secret/create/", post(create_secret::<S>))
        .route("/vault/secret/fetch", post(fetch_secret::<S>))
        .route("/healthz", get(healthz_handler))
        .with_state(service)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve<S>(addr: &str, service: Arc<VaultService<S>>) -> Result<()>
where
    S: SecretStore + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    // If the handler cannot be installed, run until killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

async fn create_secret<S>(
    State(service): State<Arc<VaultService<S>>>,
    Json(req): Json<CreateSecretReq>,
) -> std::result::Result<Json<CreateSecretResp>, ApiError>
where
    S: SecretStore + 'static,
{
    let id = run_blocking(move || service.create(&req.secret)).await?;
    Ok(Json(CreateSecretResp {
        secret_id: id.to_string(),
    }))
}

async fn fetch_secret<S>(
    State(service): State<Arc<VaultService<S>>>,
    Json(req): Json<FetchSecretReq>,
) -> std::result::Result<Json<FetchSecretResp>, ApiError>
where
    S: SecretStore + 'static,
{
    let secret = run_blocking(move || service.fetch(&req.secret_id)).await?;
    Ok(Json(FetchSecretResp { secret }))
}

async fn healthz_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Run a vault call on the blocking pool; crypto and SQLite are synchronous.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| VaultError::Internal(format!("vault task failed: {e}")))?
}
