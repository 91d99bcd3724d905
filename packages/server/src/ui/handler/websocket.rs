//! WebSocket connection handlers.
//!
//! Each accepted socket gets two tasks: a reader that drives inbound frames
//! through moderation into the room, and a writer that drains the member's
//! outbound channel. Whichever ends first aborts the other, and the handler
//! then detaches the connection. That is the only place membership is
//! released by the handler.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ChatMessage, Room},
    infrastructure::dto::websocket::{ChatFrame, ErrorFrame},
    ui::{
        error::ApiError,
        state::{AppState, ConnectQuery},
    },
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinedConnection,
        SendMessageUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let room_name = query
        .room
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::bad_request("Room name is required"))?;

    // Reject unknown rooms before upgrading; no connection state is created
    let room = ConnectParticipantUseCase::new(state.registry.clone())
        .resolve_room(room_name.clone())
        .await
        .inspect_err(|_| tracing::warn!("Connection to unknown room '{}' rejected", room_name))?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room)))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room: Arc<Room>) {
    let (mut sender, mut receiver) = socket.split();

    // Join before the first read
    let JoinedConnection {
        mut connection,
        receiver: mut outbound,
    } = ConnectParticipantUseCase::new(state.registry.clone())
        .execute(&room)
        .await;
    let connection_id = connection.id().clone();

    // Error replies go only to this socket, never through the room
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<ErrorFrame>();

    // Writer: room deliveries and local error replies
    let writer_id = connection_id.clone();
    let mut send_task = tokio::spawn(async move {
        loop {
            let encoded = tokio::select! {
                delivery = outbound.recv() => match delivery {
                    Some(message) => serde_json::to_string(&ChatFrame::from(message)),
                    // Sender dropped: this member was removed from the room
                    None => break,
                },
                Some(reply) = reply_rx.recv() => serde_json::to_string(&reply),
            };

            let text = match encoded {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Failed to encode frame for '{}': {}", writer_id, e);
                    continue;
                }
            };

            if let Err(e) = sender.send(Message::Text(text.into())).await {
                tracing::debug!("Write to '{}' failed: {}", writer_id, e);
                break;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    });

    // Reader: frames → moderation → room queue
    let send_usecase = SendMessageUseCase::new(state.moderation.clone());
    let reader_room = room.clone();
    let reader_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("Read from '{}' failed: {}", reader_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let message = match parse_chat_frame(&text) {
                        Ok(message) => message,
                        Err(reason) => {
                            tracing::warn!("Invalid frame from '{}': {}", reader_id, reason);
                            let _ = reply_tx.send(ErrorFrame { error: reason });
                            continue;
                        }
                    };

                    match send_usecase.execute(&reader_room, message).await {
                        Ok(outcome) => {
                            tracing::debug!("Message from '{}': {:?}", reader_id, outcome);
                        }
                        Err(e) => {
                            tracing::error!("Room '{}' unavailable: {}", reader_room.name(), e);
                            break;
                        }
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", reader_id);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    DisconnectParticipantUseCase::execute(&mut connection, &room).await;
}

/// Decode and validate one inbound text frame.
fn parse_chat_frame(text: &str) -> Result<ChatMessage, String> {
    let frame: ChatFrame =
        serde_json::from_str(text).map_err(|e| format!("Malformed message frame: {e}"))?;
    ChatMessage::try_from(frame).map_err(|e| e.to_string())
}
