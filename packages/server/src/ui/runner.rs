//! Server startup.

use std::sync::Arc;

use axum::http::HeaderValue;
use tokio::net::TcpListener;

use crate::{
    config::ServerConfig, error::ServerError,
    infrastructure::repository::InMemoryRoomRegistry,
};

use super::{router::build_router, signal::shutdown_signal, state::AppState};

/// Run the server until a shutdown signal arrives.
///
/// # Errors
///
/// Fails if the configuration is invalid, the address cannot be bound, or
/// serving stops with an I/O error.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let cors_origin = HeaderValue::from_str(&config.cors_origin)
        .map_err(|_| ServerError::InvalidCorsOrigin(config.cors_origin.clone()))?;

    let state = Arc::new(AppState::new(
        Arc::new(InMemoryRoomRegistry::new()),
        config.moderation_gate()?,
    ));
    let app = build_router(state, cors_origin);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
    tracing::info!("Listening on {}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}
