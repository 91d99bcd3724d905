//! Core domain models for the chat broker.

use serde::{Deserialize, Serialize};

use super::value_object::{ConnectionId, MessageContent, RoomName, Timestamp, Username};

/// A chat message scoped to one room.
///
/// Messages are never stored; a message lives for the single dispatch pass
/// that delivers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub username: Username,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn new(username: Username, content: MessageContent) -> Self {
        Self { username, content }
    }
}

/// A member of a room as seen by a membership query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: ConnectionId,
    pub joined_at: Timestamp,
}

/// Lifecycle state of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionState {
    /// Present in the room's member set and eligible for delivery
    Joined,
    /// Removed from the room; terminal
    Detached,
}

/// One client's membership of a room, owned by its connection handler.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    room: RoomName,
    joined_at: Timestamp,
    state: ConnectionState,
}

impl Connection {
    /// Create a connection that has just joined `room`
    pub fn joined(id: ConnectionId, room: RoomName, joined_at: Timestamp) -> Self {
        Self {
            id,
            room,
            joined_at,
            state: ConnectionState::Joined,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn room(&self) -> &RoomName {
        &self.room
    }

    pub fn joined_at(&self) -> Timestamp {
        self.joined_at
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> ConnectionState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn is_joined(&self) -> bool {
        self.state == ConnectionState::Joined
    }

    /// Move to `Detached`.
    ///
    /// Returns `true` only on the transition itself, so callers release the
    /// membership exactly once.
    pub fn detach(&mut self) -> bool {
        match self.state {
            ConnectionState::Joined => {
                self.state = ConnectionState::Detached;
                true
            }
            ConnectionState::Detached => false,
        }
    }
}
