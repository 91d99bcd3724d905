//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use parley_shared::time::timestamp_to_jst_rfc3339;

use crate::{
    infrastructure::dto::http::{
        CreateRoomRequest, CreateRoomResponse, MemberDto, RoomDetailDto, RoomListDto,
    },
    ui::{error::ApiError, state::AppState},
    usecase::{CreateRoomUseCase, GetRoomDetailUseCase, ListRoomsUseCase},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create a room
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateRoomRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateRoomResponse>), ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Malformed create_room body: {}", rejection);
        ApiError::bad_request("Invalid room name")
    })?;

    let usecase = CreateRoomUseCase::new(state.registry.clone());
    let name = usecase.execute(request.room_name).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRoomResponse {
            message: "Room created successfully".to_string(),
            room_name: name.into_string(),
        }),
    ))
}

/// Get list of room names
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<RoomListDto> {
    let rooms = ListRoomsUseCase::new(state.registry.clone()).execute().await;
    Json(RoomListDto { rooms })
}

/// Get room detail (current members) by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_name): Path<String>,
) -> Result<Json<RoomDetailDto>, ApiError> {
    let detail = GetRoomDetailUseCase::new(state.registry.clone())
        .execute(room_name)
        .await?;

    Ok(Json(RoomDetailDto {
        room_name: detail.name.into_string(),
        created_at: timestamp_to_jst_rfc3339(detail.created_at.value()),
        members: detail
            .members
            .into_iter()
            .map(|m| MemberDto {
                connection_id: m.id.to_string(),
                joined_at: timestamp_to_jst_rfc3339(m.joined_at.value()),
            })
            .collect(),
    }))
}
