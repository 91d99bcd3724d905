//! UseCase: 参加者切断処理
//!
//! 接続を Detached に遷移させ、ルームのメンバーから削除する。
//! Detached は終端状態なので、同じ接続に対して 2 回目以降は何もしない。

use crate::domain::{Connection, Room};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase;

impl DisconnectParticipantUseCase {
    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// ルームのメンバーから実際に削除した場合は `true`。
    /// 既に Detached の場合や、ディスパッチャーが先に削除していた場合は `false`。
    pub async fn execute(connection: &mut Connection, room: &Room) -> bool {
        if !connection.detach() {
            return false;
        }

        let removed = room.leave(connection.id()).await;
        tracing::info!(
            room = %connection.room(),
            connection_id = %connection.id(),
            joined_at = %connection.joined_at(),
            removed,
            "Connection left"
        );
        removed
    }
}
