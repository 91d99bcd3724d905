//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::resolve_room() と execute()
//!
//! ### なぜこのテストが必要か
//! - 存在しないルームへの接続は、状態を何も作らずに拒否される必要がある
//! - 接続はトランスポートを読み始める前にメンバーとして登録される
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存ルームへの参加
//! - 異常系：存在しないルーム、空のルーム名

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{
    Connection, ConnectionIdFactory, MemberReceiver, Room, RoomRegistry, Timestamp,
};

use super::{error::LookupError, lookup_room};

/// A connection that is now a room member, plus the receiving end of its
/// outbound channel (to be drained by the transport writer)
pub struct JoinedConnection {
    pub connection: Connection,
    pub receiver: MemberReceiver,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl ConnectParticipantUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 接続前にルームの存在を確認する（トランスポートのアップグレード前に呼ぶ）
    pub async fn resolve_room(&self, room_name: String) -> Result<Arc<Room>, LookupError> {
        lookup_room(self.registry.as_ref(), room_name).await
    }

    /// 参加者接続を実行
    ///
    /// 新しい ConnectionId を割り当て、ルームのメンバーに追加する。
    pub async fn execute(&self, room: &Room) -> JoinedConnection {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = ConnectionIdFactory::generate();
        let joined_at = Timestamp::now();

        room.join(id.clone(), joined_at, sender).await;
        tracing::info!(room = %room.name(), connection_id = %id, "Connection joined");

        JoinedConnection {
            connection: Connection::joined(id, room.name().clone(), joined_at),
            receiver,
        }
    }
}
