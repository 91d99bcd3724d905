//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をプロセス内のルーム一覧として使用します。
//!
//! ロックは名前→Room のマップ全体を守る RwLock ひとつだけで、
//! 挿入・検索の間だけ保持します。モデレーション呼び出しや配信中には保持しません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{RegistryError, Room, RoomName, RoomRegistry, Timestamp};

/// インメモリ Room Registry 実装
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    rooms: RwLock<HashMap<RoomName, Arc<Room>>>,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn create_room(&self, name: RoomName) -> Result<Arc<Room>, RegistryError> {
        // 存在チェックと挿入を同じ書き込みロック内で行う（同名の同時作成を防ぐ）
        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&name) {
            return Err(RegistryError::AlreadyExists(name.into_string()));
        }

        let room = Room::open(name.clone(), Timestamp::now());
        rooms.insert(name, room.clone());
        Ok(room)
    }

    async fn get_room(&self, name: &RoomName) -> Result<Arc<Room>, RegistryError> {
        let rooms = self.rooms.read().await;
        rooms
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    async fn list_room_names(&self) -> Vec<RoomName> {
        let rooms = self.rooms.read().await;
        let mut names: Vec<RoomName> = rooms.keys().cloned().collect();
        drop(rooms);
        names.sort();
        names
    }

    async fn count_rooms(&self) -> usize {
        self.rooms.read().await.len()
    }
}
