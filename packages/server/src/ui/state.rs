//! Server state and connection parameters.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{ModerationGate, RoomRegistry};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub room: Option<String>,
}

/// Shared application state
pub struct AppState {
    /// Room directory (abstracted so handlers never see the storage)
    pub registry: Arc<dyn RoomRegistry>,
    /// Classifier consulted for every inbound chat message
    pub moderation: Arc<dyn ModerationGate>,
}

impl AppState {
    pub fn new(registry: Arc<dyn RoomRegistry>, moderation: Arc<dyn ModerationGate>) -> Self {
        Self {
            registry,
            moderation,
        }
    }
}
