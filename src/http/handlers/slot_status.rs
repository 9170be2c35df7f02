use crate::domain::slot::UpdateSlotStatusRequest;
use crate::error::AppError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn get_slot_status(
    State(state): State<AppState>,
    Path((event_id, game_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.slot_status.get(&event_id, &game_id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn set_slot_status(
    State(state): State<AppState>,
    Path((event_id, game_id)): Path<(String, String)>,
    payload: Result<Json<UpdateSlotStatusRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    match state.slot_status.set(&event_id, &game_id, req).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn clear_slot_status(
    State(state): State<AppState>,
    Path((event_id, game_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.slot_status.clear(&event_id, &game_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
