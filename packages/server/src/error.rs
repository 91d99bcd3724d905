//! Errors that stop the server from starting or serving.

use thiserror::Error;

use crate::domain::ModerationError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    #[error("Invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),

    #[error("Failed to set up moderation: {0}")]
    Moderation(#[from] ModerationError),
}
