//! Moderated chat room broker.
//!
//! Clients create named rooms over HTTP and join them over WebSocket. Every
//! inbound message is screened by a moderation gate before the room's
//! dispatcher fans it out to the members connected at that moment.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::{AppState, build_router, run as run_server};
