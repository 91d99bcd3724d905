//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - モデレーション結果に応じたエンキュー（原文・置換・破棄）
//!
//! ### なぜこのテストが必要か
//! - Rejected のメッセージが原文のまま配信されないことを保証する
//! - モデレーション失敗時にメッセージが破棄され、送信者は参加したままであることを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：Approved → 原文を配信
//! - 正常系：Rejected → 固定の通知を送信者本人も含む全員に配信
//! - 異常系：モデレーション失敗 → 何も配信しない

use std::sync::Arc;

use crate::domain::{ChatMessage, ModerationDecision, ModerationError, ModerationGate, Room};

use super::error::SendMessageError;

/// What happened to one inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Enqueued verbatim
    Delivered,
    /// Enqueued with the moderation notice in place of its content
    Substituted,
    /// Not enqueued because the moderation gate failed
    Dropped(ModerationError),
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    moderation: Arc<dyn ModerationGate>,
}

impl SendMessageUseCase {
    pub fn new(moderation: Arc<dyn ModerationGate>) -> Self {
        Self { moderation }
    }

    /// メッセージ送信を実行
    ///
    /// モデレーションは呼び出し元のタスク上で待つ。ルームのロックは保持しない。
    ///
    /// # Errors
    ///
    /// ルームのディスパッチャーが停止している場合のみ `SendMessageError::RoomClosed`。
    pub async fn execute(
        &self,
        room: &Room,
        message: ChatMessage,
    ) -> Result<SendOutcome, SendMessageError> {
        let decision = match self.moderation.classify(message.content.as_str()).await {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!(
                    room = %room.name(),
                    username = %message.username,
                    error = %e,
                    "Moderation failed, message dropped"
                );
                return Ok(SendOutcome::Dropped(e));
            }
        };

        let outcome = match decision {
            ModerationDecision::Approved => SendOutcome::Delivered,
            ModerationDecision::Rejected => {
                tracing::info!(
                    room = %room.name(),
                    username = %message.username,
                    "Message hidden by moderation"
                );
                SendOutcome::Substituted
            }
        };

        room.enqueue(decision.apply(message))?;
        Ok(outcome)
    }
}
