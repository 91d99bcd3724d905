//! Registry abstraction.
//!
//! Use cases depend on this trait; `infrastructure::registry` provides the
//! in-memory implementation (dependency inversion).

use std::sync::Arc;

use async_trait::async_trait;

use super::{RoomName, error::RegistryError, room::Room};

/// Process-wide directory of rooms
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Create a room, start its dispatcher and publish it under `name`.
    ///
    /// # Errors
    ///
    /// `RegistryError::AlreadyExists` if `name` is already registered.
    async fn create_room(&self, name: RoomName) -> Result<Arc<Room>, RegistryError>;

    /// # Errors
    ///
    /// `RegistryError::NotFound` if no room is registered under `name`.
    async fn get_room(&self, name: &RoomName) -> Result<Arc<Room>, RegistryError>;

    /// Snapshot of all registered names, sorted
    async fn list_room_names(&self) -> Vec<RoomName>;

    async fn count_rooms(&self) -> usize;
}
