//! UseCase: ルーム詳細（メンバー一覧）取得

use std::sync::Arc;

use crate::domain::{Member, RoomName, RoomRegistry, Timestamp};

use super::{error::LookupError, lookup_room};

/// Point-in-time view of one room
#[derive(Debug, Clone)]
pub struct RoomDetail {
    pub name: RoomName,
    pub created_at: Timestamp,
    pub members: Vec<Member>,
}

/// ルーム詳細のユースケース
pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, room_name: String) -> Result<RoomDetail, LookupError> {
        let room = lookup_room(self.registry.as_ref(), room_name).await?;
        Ok(RoomDetail {
            name: room.name().clone(),
            created_at: room.created_at(),
            members: room.members().await,
        })
    }
}
