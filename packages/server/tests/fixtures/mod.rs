//! Shared test server for integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::http::HeaderValue;
use futures_util::StreamExt;
use parley_server::{
    AppState, build_router,
    domain::{ModerationDecision, ModerationError, ModerationGate},
    infrastructure::repository::InMemoryRoomRegistry,
};
use tokio::{net::TcpListener, sync::oneshot};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

pub const RECV_TIMEOUT: Duration = Duration::from_secs(3);

/// Rejects "bad word", fails on "boom", approves everything else
pub struct ScriptedGate;

#[async_trait]
impl ModerationGate for ScriptedGate {
    async fn classify(&self, text: &str) -> Result<ModerationDecision, ModerationError> {
        match text {
            "bad word" => Ok(ModerationDecision::Rejected),
            "boom" => Err(ModerationError::Unreachable("classifier down".to_string())),
            _ => Ok(ModerationDecision::Approved),
        }
    }
}

/// In-process server on an ephemeral port, stopped on drop
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let state = Arc::new(AppState::new(
            Arc::new(InMemoryRoomRegistry::new()),
            Arc::new(ScriptedGate),
        ));
        let router = build_router(state, HeaderValue::from_static("http://localhost:5173"));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        Self {
            addr,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, room: &str) -> String {
        format!("ws://{}/ws?room={}", self.addr, room)
    }

    pub async fn create_room(&self, name: &str) {
        let response = reqwest::Client::new()
            .post(format!("{}/create_room", self.base_url()))
            .json(&serde_json::json!({ "room_name": name }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201, "create_room '{name}' failed");
    }

    pub async fn member_count(&self, room: &str) -> usize {
        let body: serde_json::Value = reqwest::get(format!("{}/rooms/{}", self.base_url(), room))
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Failed to parse JSON");
        body["members"].as_array().map(Vec::len).unwrap_or(0)
    }

    /// Poll the room detail endpoint until it reports `expected` members
    pub async fn wait_for_members(&self, room: &str, expected: usize) {
        let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
        loop {
            let count = self.member_count(room).await;
            if count == expected {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "room '{room}' has {count} members, expected {expected}"
            );
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    /// Connect and wait until the server has registered the membership
    pub async fn join(&self, room: &str) -> WsClient {
        let before = self.member_count(room).await;
        let (ws, _) = connect_async(self.ws_url(room)).await.expect("ws connect");
        self.wait_for_members(room, before + 1).await;
        ws
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

pub fn chat(username: &str, content: &str) -> Message {
    Message::Text(
        serde_json::json!({ "username": username, "content": content })
            .to_string()
            .into(),
    )
}

/// Next text frame as JSON, skipping control frames
pub async fn next_json(ws: &mut WsClient) -> serde_json::Value {
    loop {
        let frame = tokio::time::timeout(RECV_TIMEOUT, ws.next())
            .await
            .expect("timed out waiting for frame")
            .expect("stream ended")
            .expect("ws error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(&text).expect("frame is JSON");
        }
    }
}
