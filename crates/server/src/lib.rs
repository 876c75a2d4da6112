//! HTTP surface of the desk backend.
//!
//! Routes live under `/api`, plus `/health` and a plain-text banner on `/`.
//! Handler failures and unknown paths are answered with `{"error": "<code>"}`;
//! a known path called with the wrong method gets a bare 405.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
mod routes;

use std::net::SocketAddr;

use axum::Router;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use services::{AppServices, AppServicesError, Clock};

pub use config::{ConfigError, CorsPolicy, ServerConfig};
pub use error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct ApiState {
    services: AppServices,
}

impl ApiState {
    #[must_use]
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServerError {
    #[error(transparent)]
    Services(#[from] AppServicesError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Build the full router with CORS and request tracing applied.
#[must_use]
pub fn router(state: ApiState, cors: &CorsPolicy) -> Router {
    routes::routes()
        .with_state(state)
        .layer(cors.layer())
        .layer(TraceLayer::new_for_http())
}

/// Open the database, bind the listener and serve until the process exits.
///
/// # Errors
///
/// Returns `ServerError` if the database cannot be prepared or the address
/// cannot be bound.
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let services = AppServices::new_sqlite(&config.db_url, Clock::default_clock()).await?;
    let app = router(ApiState::new(services), &config.cors);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.addr,
            source,
        })?;
    tracing::info!(addr = %config.addr, cors = %config.cors, "desk api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
