//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod connect_participant;
pub mod create_room;
pub mod disconnect_participant;
pub mod error;
pub mod get_room_detail;
pub mod list_rooms;
pub mod send_message;

pub use connect_participant::{ConnectParticipantUseCase, JoinedConnection};
pub use create_room::CreateRoomUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{CreateRoomError, LookupError, SendMessageError};
pub use get_room_detail::{GetRoomDetailUseCase, RoomDetail};
pub use list_rooms::ListRoomsUseCase;
pub use send_message::{SendMessageUseCase, SendOutcome};

use std::sync::Arc;

use crate::domain::{RegistryError, Room, RoomName, RoomRegistry};

/// Resolve a client-supplied room name to a live room
pub(crate) async fn lookup_room(
    registry: &dyn RoomRegistry,
    room_name: String,
) -> Result<Arc<Room>, LookupError> {
    let name = RoomName::try_from(room_name).map_err(LookupError::InvalidName)?;
    registry.get_room(&name).await.map_err(|e| match e {
        RegistryError::NotFound(missing) | RegistryError::AlreadyExists(missing) => {
            LookupError::NotFound(missing)
        }
    })
}
