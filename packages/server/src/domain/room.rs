//! Room aggregate and its dispatcher.
//!
//! A room owns its member set and an unbounded inbound queue. One dispatcher
//! task per room drains the queue and fans each message out to a snapshot of
//! the members taken at dispatch time. Members whose outbound channel is gone
//! are pruned; nothing else stops the dispatcher short of the room itself
//! being dropped.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, mpsc};

use super::{
    ChatMessage, ConnectionId, Member, RoomName, Timestamp,
    error::RoomError,
};

/// Sending half of a member's outbound channel (read by its writer task)
pub type MemberSender = mpsc::UnboundedSender<ChatMessage>;

/// Receiving half of a member's outbound channel
pub type MemberReceiver = mpsc::UnboundedReceiver<ChatMessage>;

struct MemberSlot {
    joined_at: Timestamp,
    sender: MemberSender,
}

type MemberSet = Arc<Mutex<HashMap<ConnectionId, MemberSlot>>>;

/// A named broadcast domain
pub struct Room {
    name: RoomName,
    created_at: Timestamp,
    members: MemberSet,
    queue: mpsc::UnboundedSender<ChatMessage>,
}

impl Room {
    /// Create a room and start its dispatcher.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn open(name: RoomName, created_at: Timestamp) -> Arc<Self> {
        let (queue, inbox) = mpsc::unbounded_channel();
        let members: MemberSet = Arc::default();

        tokio::spawn(dispatch(name.clone(), members.clone(), inbox));

        Arc::new(Self {
            name,
            created_at,
            members,
            queue,
        })
    }

    pub fn name(&self) -> &RoomName {
        &self.name
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Add a connection to the member set.
    ///
    /// Callers must not join the same connection twice.
    pub async fn join(&self, id: ConnectionId, joined_at: Timestamp, sender: MemberSender) {
        let mut members = self.members.lock().await;
        members.insert(id, MemberSlot { joined_at, sender });
    }

    /// Remove a connection from the member set.
    ///
    /// Returns `false` if it was already absent (e.g. pruned by the dispatcher).
    pub async fn leave(&self, id: &ConnectionId) -> bool {
        let mut members = self.members.lock().await;
        members.remove(id).is_some()
    }

    /// Append a message to the inbound queue. Never blocks.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::DispatcherStopped` if the dispatcher has exited.
    pub fn enqueue(&self, message: ChatMessage) -> Result<(), RoomError> {
        self.queue
            .send(message)
            .map_err(|_| RoomError::DispatcherStopped(self.name.to_string()))
    }

    /// Snapshot of the current members, oldest first
    pub async fn members(&self) -> Vec<Member> {
        let members = self.members.lock().await;
        let mut snapshot: Vec<Member> = members
            .iter()
            .map(|(id, slot)| Member {
                id: id.clone(),
                joined_at: slot.joined_at,
            })
            .collect();
        drop(members);

        snapshot.sort_by(|a, b| {
            a.joined_at
                .cmp(&b.joined_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        snapshot
    }

    pub async fn member_count(&self) -> usize {
        self.members.lock().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_member(&self, id: &ConnectionId) -> bool {
        self.members.lock().await.contains_key(id)
    }
}

/// Dispatcher loop: one per room, single consumer of the room's queue.
async fn dispatch(
    room: RoomName,
    members: MemberSet,
    mut inbox: mpsc::UnboundedReceiver<ChatMessage>,
) {
    tracing::debug!(room = %room, "Dispatcher started");

    while let Some(message) = inbox.recv().await {
        let snapshot: Vec<(ConnectionId, MemberSender)> = {
            let members = members.lock().await;
            members
                .iter()
                .map(|(id, slot)| (id.clone(), slot.sender.clone()))
                .collect()
        };

        let failed: Vec<ConnectionId> = snapshot
            .into_iter()
            .filter_map(|(id, sender)| sender.send(message.clone()).err().map(|_| id))
            .collect();

        if !failed.is_empty() {
            // Dropping the slot drops the last sender, which closes the writer
            let mut members = members.lock().await;
            for id in failed {
                if members.remove(&id).is_some() {
                    tracing::warn!(room = %room, connection_id = %id, "Delivery failed, member pruned");
                }
            }
        }
    }

    tracing::debug!(room = %room, "Dispatcher stopped");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::{ConnectionIdFactory, MessageContent, Username};

    const RECV_TIMEOUT: Duration = Duration::from_secs(1);

    fn message(username: &str, content: &str) -> ChatMessage {
        ChatMessage::new(
            Username::new(username.to_string()).unwrap(),
            MessageContent::new(content.to_string()).unwrap(),
        )
    }

    fn open_room(name: &str) -> Arc<Room> {
        Room::open(RoomName::new(name.to_string()).unwrap(), Timestamp::new(0))
    }

    async fn recv(rx: &mut MemberReceiver) -> ChatMessage {
        tokio::time::timeout(RECV_TIMEOUT, rx.recv())
            .await
            .expect("timed out waiting for delivery")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn test_join_and_leave() {
        // テスト項目: join でメンバーに追加され、leave で削除される
        // given (前提条件):
        let room = open_room("help");
        let id = ConnectionIdFactory::generate();
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        room.join(id.clone(), Timestamp::new(1000), tx).await;

        // then (期待する結果):
        assert!(room.is_member(&id).await);
        assert_eq!(room.member_count().await, 1);

        assert!(room.leave(&id).await);
        assert!(!room.is_member(&id).await);
        assert!(!room.leave(&id).await, "second leave is a no-op");
    }

    #[tokio::test]
    async fn test_fan_out_preserves_enqueue_order() {
        // テスト項目: 全メンバーがエンキュー順にメッセージを受信する
        // given (前提条件):
        let room = open_room("help");
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        room.join(ConnectionIdFactory::generate(), Timestamp::new(1), tx_a)
            .await;
        room.join(ConnectionIdFactory::generate(), Timestamp::new(2), tx_b)
            .await;

        // when (操作):
        for i in 0..20 {
            room.enqueue(message("A", &format!("message {i}"))).unwrap();
        }

        // then (期待する結果):
        for i in 0..20 {
            let expected = message("A", &format!("message {i}"));
            assert_eq!(recv(&mut rx_a).await, expected);
            assert_eq!(recv(&mut rx_b).await, expected);
        }
    }

    #[tokio::test]
    async fn test_failed_member_is_pruned_and_others_still_receive() {
        // テスト項目: 配信に失敗したメンバーは削除され、他のメンバーには配信が続く
        // given (前提条件):
        let room = open_room("help");
        let id_a = ConnectionIdFactory::generate();
        let id_b = ConnectionIdFactory::generate();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, rx_b) = mpsc::unbounded_channel();
        room.join(id_a.clone(), Timestamp::new(1), tx_a).await;
        room.join(id_b.clone(), Timestamp::new(2), tx_b).await;

        // when (操作): B のトランスポートが閉じた状態で 2 通送る
        drop(rx_b);
        room.enqueue(message("A", "first")).unwrap();
        room.enqueue(message("A", "second")).unwrap();

        // then (期待する結果):
        assert_eq!(recv(&mut rx_a).await, message("A", "first"));
        assert_eq!(recv(&mut rx_a).await, message("A", "second"));
        // "second" の配信スナップショットは "first" の prune 後に取られる
        assert!(!room.is_member(&id_b).await);
        assert!(room.is_member(&id_a).await);
    }

    #[tokio::test]
    async fn test_left_member_receives_nothing() {
        // テスト項目: leave したメンバーには以後配信されない
        // given (前提条件):
        let room = open_room("help");
        let id_b = ConnectionIdFactory::generate();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        room.join(ConnectionIdFactory::generate(), Timestamp::new(1), tx_a)
            .await;
        room.join(id_b.clone(), Timestamp::new(2), tx_b).await;

        // when (操作):
        room.leave(&id_b).await;
        room.enqueue(message("A", "after leave")).unwrap();

        // then (期待する結果):
        assert_eq!(recv(&mut rx_a).await, message("A", "after leave"));
        // leave で sender が破棄されるので B のチャンネルは閉じている
        assert!(rx_b.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_members_snapshot_sorted_by_join_time() {
        // テスト項目: メンバー一覧は参加時刻順のスナップショット
        // given (前提条件):
        let room = open_room("help");
        let early = ConnectionIdFactory::generate();
        let late = ConnectionIdFactory::generate();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        room.join(late.clone(), Timestamp::new(2000), tx1).await;
        room.join(early.clone(), Timestamp::new(1000), tx2).await;
        let members = room.members().await;

        // then (期待する結果):
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].id, early);
        assert_eq!(members[1].id, late);
    }

    #[tokio::test]
    async fn test_enqueue_with_no_members_is_ok() {
        // テスト項目: メンバーがいなくてもエンキューは成功する
        // given (前提条件):
        let room = open_room("empty");

        // when (操作):
        let result = room.enqueue(message("A", "hello"));

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(room.name().as_str(), "empty");
    }
}
