use crate::domain::payment::{CallbackRequest, InitiatePaymentRequest};
use crate::error::AppError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

pub async fn initiate_payment(
    State(state): State<AppState>,
    payload: Result<Json<InitiatePaymentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    match state.payment_service.initiate(req).await {
        Ok(resp) => (axum::http::StatusCode::OK, Json(resp)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn payment_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CallbackRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    let x_verify = headers.get("X-VERIFY").and_then(|h| h.to_str().ok());
    match state.payment_service.handle_callback(x_verify, body).await {
        Ok(outcome) => (axum::http::StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn payment_status(
    State(state): State<AppState>,
    Path(merchant_transaction_id): Path<String>,
) -> impl IntoResponse {
    match state.payment_service.check_status(&merchant_transaction_id).await {
        Ok(outcome) => (axum::http::StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}
