//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RegistryError, RoomError, ValueObjectError};

/// Errors from creating a room
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateRoomError {
    #[error("Invalid room name: {0}")]
    InvalidName(ValueObjectError),

    #[error("Room '{0}' already exists")]
    AlreadyExists(String),

    #[error(transparent)]
    Registry(RegistryError),
}

/// Errors from resolving a room by name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Invalid room name: {0}")]
    InvalidName(ValueObjectError),

    #[error("Room '{0}' not found")]
    NotFound(String),
}

/// Errors from sending a message into a room
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    #[error(transparent)]
    RoomClosed(#[from] RoomError),
}
