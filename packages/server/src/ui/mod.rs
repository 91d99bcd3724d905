//! WebSocket chat server implementation.

mod error;
mod handler;
mod router;
mod runner;
mod signal;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use runner::run;
pub use state::AppState;
