//! Domain layer for the chat broker.
//!
//! Value objects, the connection lifecycle, the Room aggregate with its
//! dispatcher, and the traits the outer layers implement.

pub mod entity;
pub mod error;
pub mod factory;
pub mod moderation;
pub mod repository;
pub mod room;
pub mod value_object;

pub use entity::{ChatMessage, Connection, ConnectionState, Member};
pub use error::{ModerationError, RegistryError, RoomError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use moderation::{MODERATION_NOTICE, ModerationDecision, ModerationGate};
#[cfg(test)]
pub use moderation::MockModerationGate;
pub use repository::RoomRegistry;
pub use room::{MemberReceiver, MemberSender, Room};
pub use value_object::{ConnectionId, MessageContent, RoomName, Timestamp, Username};
