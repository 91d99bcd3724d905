//! UseCase: ルーム作成処理

use std::sync::Arc;

use crate::domain::{RegistryError, RoomName, RoomRegistry};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl CreateRoomUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// ルーム作成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(RoomName)` - 作成されたルーム名
    /// * `Err(CreateRoomError)` - 名前が空、または既に存在する
    pub async fn execute(&self, room_name: String) -> Result<RoomName, CreateRoomError> {
        let name = RoomName::try_from(room_name).map_err(CreateRoomError::InvalidName)?;

        self.registry
            .create_room(name.clone())
            .await
            .map_err(|e| match e {
                RegistryError::AlreadyExists(existing) => CreateRoomError::AlreadyExists(existing),
                other => CreateRoomError::Registry(other),
            })?;

        let total = self.registry.count_rooms().await;
        tracing::info!(room = %name, total, "Room created");
        Ok(name)
    }
}
