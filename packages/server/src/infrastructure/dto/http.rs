//! HTTP API request and response DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /create_room`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub room_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub message: String,
    pub room_name: String,
}

/// Room names for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomListDto {
    pub rooms: Vec<String>,
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub room_name: String,
    pub created_at: String, // ISO 8601
    pub members: Vec<MemberDto>,
}

/// Member entry for room detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDto {
    pub connection_id: String,
    pub joined_at: String, // ISO 8601
}

/// Error body shared by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
