//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub errno: u16,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            errno: status.as_u16(),
            error: error.into(),
        }
    }
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = status.as_u16(), error = %msg, "Resource not found");
                msg
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = status.as_u16(), error = %msg, "Bad request");
                msg
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = status.as_u16(), error = %msg, "Internal server error");
                msg
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(errno = status.as_u16(), error = %msg, "Remote service unavailable");
                msg
            }
        };

        (status, Json(ErrorResponse::new(status, msg))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound(msg) => ApiError::NotFound(msg),
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::RemoteRejected(msg) => ApiError::BadRequest(msg),
            ApplicationError::RemoteUnavailable(msg) => ApiError::ServiceUnavailable(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}
