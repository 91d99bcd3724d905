//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomName validation error
    #[error("Room name cannot be empty")]
    RoomNameEmpty,

    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("Username cannot exceed {max} bytes (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} bytes (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },

    /// ConnectionId is not a valid UUID
    #[error("ConnectionId must be a valid UUID (got: {0})")]
    ConnectionIdInvalidFormat(String),
}

/// Errors raised by a live Room
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// The room's dispatcher task has exited and no longer drains the queue
    #[error("Dispatcher for room '{0}' has stopped")]
    DispatcherStopped(String),
}

/// Errors returned by the room registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Room '{0}' already exists")]
    AlreadyExists(String),

    #[error("Room '{0}' not found")]
    NotFound(String),
}

/// Errors returned by a moderation gate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModerationError {
    /// Classifier could not be reached (connection failure, timeout)
    #[error("Moderation service unreachable: {0}")]
    Unreachable(String),

    /// Classifier answered with a non-success status
    #[error("Moderation service error: {0}")]
    Api(String),

    /// Classifier answered with a body we could not interpret
    #[error("Unexpected moderation response: {0}")]
    InvalidResponse(String),
}
