//! Classifier backed by an OpenAI-compatible chat completion endpoint.
//!
//! The model is asked to answer `1` for appropriate text and `0` otherwise.
//! Only an exact `1` (after trimming) approves; any other answer rejects.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::{ModerationDecision, ModerationError, ModerationGate};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_PROMPT: &str = "You are a bot that checks if a chat message is appropriate. \
    A message is inappropriate if it contains bad words. \
    If it is appropriate return 1; else return 0.";

/// Connection settings for the classifier
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl OpenAiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [PromptMessage<'a>; 2],
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct PromptMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Moderation gate calling `{base_url}/chat/completions`
#[derive(Clone)]
pub struct OpenAiModerationGate {
    http_client: Client,
    settings: OpenAiSettings,
}

impl OpenAiModerationGate {
    /// # Errors
    ///
    /// Returns `ModerationError::Unreachable` if the HTTP client cannot be built.
    pub fn new(settings: OpenAiSettings) -> Result<Self, ModerationError> {
        let http_client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ModerationError::Unreachable(e.to_string()))?;
        Ok(Self {
            http_client,
            settings,
        })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }
}

/// Map the model's reply onto a decision
pub(crate) fn decision_from_reply(reply: &str) -> ModerationDecision {
    if reply.trim() == "1" {
        ModerationDecision::Approved
    } else {
        ModerationDecision::Rejected
    }
}

#[async_trait]
impl ModerationGate for OpenAiModerationGate {
    async fn classify(&self, text: &str) -> Result<ModerationDecision, ModerationError> {
        let start = std::time::Instant::now();
        let request = ChatCompletionRequest {
            model: &self.settings.model,
            messages: [
                PromptMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                PromptMessage {
                    role: "user",
                    content: text,
                },
            ],
            max_tokens: 1,
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.settings.base_url))
            .header("Authorization", format!("Bearer {}", self.settings.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Moderation request failed");
                ModerationError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Moderation API error");
            return Err(ModerationError::Api(format!("{status}: {error_text}")));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ModerationError::InvalidResponse(e.to_string()))?;

        let reply = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ModerationError::InvalidResponse("no choices in response".into()))?;

        let decision = decision_from_reply(&reply);
        debug!(
            model = %self.settings.model,
            ?decision,
            duration_ms = start.elapsed().as_millis(),
            "Moderation classify"
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    /// Serve `router` on an ephemeral port and return its base URL
    async fn spawn_stub(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });
        format!("http://{addr}")
    }

    fn gate_for(base_url: String) -> OpenAiModerationGate {
        let mut settings = OpenAiSettings::new("test-key");
        settings.base_url = base_url;
        settings.timeout = Duration::from_secs(2);
        OpenAiModerationGate::new(settings).unwrap()
    }

    fn reply_router(reply: &'static str) -> Router {
        Router::new().route(
            "/chat/completions",
            post(move |Json(body): Json<Value>| async move {
                assert_eq!(body["model"], DEFAULT_MODEL);
                assert_eq!(body["max_tokens"], 1);
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][1]["role"], "user");
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": reply}}]
                }))
            }),
        )
    }

    #[test]
    fn test_decision_from_reply() {
        // テスト項目: "1" のみ Approved、それ以外は Rejected
        assert_eq!(decision_from_reply("1"), ModerationDecision::Approved);
        assert_eq!(decision_from_reply(" 1\n"), ModerationDecision::Approved);
        assert_eq!(decision_from_reply("0"), ModerationDecision::Rejected);
        assert_eq!(decision_from_reply("yes"), ModerationDecision::Rejected);
    }

    #[tokio::test]
    async fn test_classify_approved() {
        // テスト項目: API が "1" を返すと Approved
        // given (前提条件):
        let gate = gate_for(spawn_stub(reply_router("1")).await);

        // when (操作):
        let decision = gate.classify("hello").await;

        // then (期待する結果):
        assert_eq!(decision, Ok(ModerationDecision::Approved));
    }

    #[tokio::test]
    async fn test_classify_rejected() {
        // テスト項目: API が "0" を返すと Rejected
        // given (前提条件):
        let gate = gate_for(spawn_stub(reply_router("0")).await);

        // when (操作):
        let decision = gate.classify("bad word").await;

        // then (期待する結果):
        assert_eq!(decision, Ok(ModerationDecision::Rejected));
    }

    #[tokio::test]
    async fn test_classify_api_error() {
        // テスト項目: API がエラーステータスを返すと ModerationError::Api
        // given (前提条件):
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
        );
        let gate = gate_for(spawn_stub(router).await);

        // when (操作):
        let result = gate.classify("hello").await;

        // then (期待する結果):
        assert!(matches!(result, Err(ModerationError::Api(_))));
    }

    #[tokio::test]
    async fn test_classify_without_choices_is_invalid_response() {
        // テスト項目: choices が空のレスポンスは InvalidResponse
        // given (前提条件):
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let gate = gate_for(spawn_stub(router).await);

        // when (操作):
        let result = gate.classify("hello").await;

        // then (期待する結果):
        assert!(matches!(result, Err(ModerationError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_classify_unreachable() {
        // テスト項目: 接続できない場合は ModerationError::Unreachable
        // given (前提条件): バインド後すぐに閉じたポート
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let gate = gate_for(format!("http://{addr}"));

        // when (操作):
        let result = gate.classify("hello").await;

        // then (期待する結果):
        assert!(matches!(result, Err(ModerationError::Unreachable(_))));
    }
}
