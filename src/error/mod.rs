use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::fetch::FetchError;

const GENERIC_FAILURE: &str = "Parse failed, please check the link or retry later";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("URL required")]
    MissingUrl,

    #[error("URL must be a valid WeChat article link")]
    InvalidDomain,

    #[error("Cover not found, please verify the link")]
    CoverNotFound,

    #[error("Request timed out, please retry")]
    Timeout,

    #[error("Cannot access link ({0})")]
    Upstream(u16),

    #[error("Network error: {0}")]
    Network(String),
}

/// Article-stage fetch failures are terminal for the request, so they map
/// straight onto the public error taxonomy.
impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Timeout => AppError::Timeout,
            FetchError::Status(status) => AppError::Upstream(status),
            FetchError::Network(msg) => AppError::Network(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = match self {
            AppError::MissingUrl | AppError::InvalidDomain => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::CoverNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Timeout => (StatusCode::REQUEST_TIMEOUT, self.to_string()),
            AppError::Upstream(code) => (
                StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_GATEWAY),
                self.to_string(),
            ),
            AppError::Network(ref e) => {
                tracing::error!("Network error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.into())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
