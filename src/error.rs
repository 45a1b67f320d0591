use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::db::StoreError;
use crate::types::ValidationError;

/// Application error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(#[from] ValidationError),

    /// Store fault while mutating; the transaction was rolled back.
    #[error("Unprocessable: {0}")]
    Unprocessable(StoreError),

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Store fault on a read path.
    #[error("Internal error: {0}")]
    Internal(#[from] StoreError),
}

impl ApiError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ApiError::NotFound(what.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The fixed message clients see; details stay in the logs.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "resource not found",
            ApiError::BadRequest(_) => "bad request",
            ApiError::Unprocessable(_) => "unprocessable",
            ApiError::MethodNotAllowed => "method not allowed",
            ApiError::Internal(_) => "internal server error",
        }
    }
}

/// Body of every failed API response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Always `false`
    pub success: bool,
    /// Numeric HTTP status
    pub error: u16,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::NotFound(what) => warn!("Not found: {}", what),
            ApiError::BadRequest(e) => warn!("Bad request: {}", e),
            ApiError::Unprocessable(e) => error!("Unprocessable, rolled back: {}", e),
            ApiError::MethodNotAllowed => warn!("Method not allowed"),
            ApiError::Internal(e) => error!("Internal error: {}", e),
        }

        let status = self.status();
        let body = Json(ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message().to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for application errors
pub type ApiResult<T> = Result<T, ApiError>;
