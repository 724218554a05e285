use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use abflug_core::provider::ProviderError;
use abflug_core::search::ValidationError;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    OriginNotAllowed,
    UpstreamAuth { status: u16, details: String },
    UpstreamApi { status: u16, details: String },
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::OriginNotAllowed => (
                StatusCode::BAD_REQUEST,
                "Origin not allowed (DACH only)".to_string(),
                None,
            ),
            AppError::UpstreamAuth { status, details } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                "Upstream authentication failed".to_string(),
                Some(details),
            ),
            AppError::UpstreamApi { status, details } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                "Upstream flight search failed".to_string(),
                Some(details),
            ),
            AppError::Internal(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(err.to_string()),
                )
            }
        };

        let mut body = json!({ "error": error });
        if let Some(details) = details {
            body["details"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Auth { status, body } => AppError::UpstreamAuth {
                status,
                details: body,
            },
            ProviderError::Api { status, body } => AppError::UpstreamApi {
                status,
                details: body,
            },
            ProviderError::Network(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}
