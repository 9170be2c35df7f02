use crate::domain::payment::{ErrorEnvelope, ErrorPayload};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("missing merchant credential: {0}")]
    MissingCredentials(&'static str),

    #[error("callback signature mismatch")]
    SignatureMismatch,

    #[error("malformed callback payload: {0}")]
    MalformedCallback(String),

    #[error("payment gateway unavailable: {message}")]
    GatewayUnavailable { message: String, timed_out: bool },

    #[error("payment gateway rejected request: {code}: {message}")]
    GatewayRejected { code: String, message: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("store failure: {0}")]
    Store(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MissingCredentials(_) => "MISSING_CREDENTIALS",
            Self::SignatureMismatch => "SIGNATURE_MISMATCH",
            Self::MalformedCallback(_) => "MALFORMED_CALLBACK",
            Self::GatewayUnavailable { timed_out: true, .. } => "GATEWAY_TIMEOUT",
            Self::GatewayUnavailable { .. } => "GATEWAY_UNAVAILABLE",
            Self::GatewayRejected { .. } => "GATEWAY_REJECTED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Store(_) => "STORE_FAILURE",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MalformedCallback(_) => StatusCode::BAD_REQUEST,
            Self::MissingCredentials(_) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SignatureMismatch => StatusCode::UNAUTHORIZED,
            Self::GatewayUnavailable { timed_out: true, .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::GatewayUnavailable { .. } | Self::GatewayRejected { .. } => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        let details = match self {
            Self::GatewayRejected { code, .. } => Some(code.clone()),
            _ => None,
        };
        ErrorEnvelope {
            error: ErrorPayload {
                code: self.code().to_string(),
                message: self.to_string(),
                details,
            },
        }
    }
}

impl From<AppError> for (StatusCode, ErrorEnvelope) {
    fn from(e: AppError) -> Self {
        (e.status(), e.envelope())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}
