//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{RoomName, RoomRegistry};

/// ルーム一覧のユースケース
pub struct ListRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl ListRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 現在のルーム名のスナップショットを返す（ルームがなければ空）
    pub async fn execute(&self) -> Vec<String> {
        self.registry
            .list_room_names()
            .await
            .into_iter()
            .map(RoomName::into_string)
            .collect()
    }
}
