//! Data transfer objects for the HTTP API and WebSocket frames.

pub mod http;
pub mod websocket;
