//! The unified error boundary for HTTP handlers.
//!
//! Every handler returns `Result<_, ApiError>`; this is the single place
//! where failures turn into status codes and `{kind, message}` bodies.
//! Client-input failures keep their message; data-layer and pipeline
//! failures are logged and redacted so internal detail never reaches the
//! caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::pagination::PageParamError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "invalid_parameter",
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        error!("request failed: {err}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "internal",
            message: "internal server error".into(),
        }
    }
}

impl From<PageParamError> for ApiError {
    fn from(err: PageParamError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<db::DbError> for ApiError {
    fn from(err: db::DbError) -> Self {
        Self::internal(err)
    }
}

impl From<sync::PipelineError> for ApiError {
    fn from(err: sync::PipelineError) -> Self {
        Self::internal(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            kind: self.kind,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}
