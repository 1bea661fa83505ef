use crate::errors::Error;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use tracing::error;

/// Failure of a request, mapped to an HTTP status and a JSON envelope
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing request data (400)
    BadRequest(String),
    /// Referenced entity or result set does not exist (404)
    NotFound(String),
    /// The route exists but not for this HTTP method (405)
    MethodNotAllowed,
    /// Data access failed while processing a valid request (422)
    Unprocessable,
    /// The server could not serve the request at all (500)
    Internal,
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg) => format!("bad request: {}", msg),
            ApiError::NotFound(msg) => format!("resource not found: {}", msg),
            ApiError::MethodNotAllowed => "method not allowed".to_string(),
            ApiError::Unprocessable => "unprocessable".to_string(),
            ApiError::Internal => "internal server error".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiError({}, {})", self.status().as_u16(), self.message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = axum::Json(ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        });
        (status, body).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        error!("Request failed: {}", e);
        match e {
            Error::PoolError(_) => ApiError::Internal,
            _ => ApiError::Unprocessable,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
