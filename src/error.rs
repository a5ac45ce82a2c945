use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures of the link, click and analytics storage components.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("link not found")]
    NotFound,

    #[error("alias already exists: {0}")]
    AliasConflict(String),

    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// Errors returned by the HTTP handlers, rendered as the JSON error envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("not found")]
    NotFound,

    #[error("url already exists")]
    Conflict,

    #[error("{0}")]
    Internal(&'static str),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound,
            StoreError::AliasConflict(_) => AppError::Conflict,
            StoreError::Unavailable(_) => AppError::Internal("internal error"),
        }
    }
}

/// `{"status":"Error","error":"..."}`
#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            status: "Error",
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
