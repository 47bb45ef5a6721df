use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use hotelbook_auth::TokenValidationError;
use hotelbook_core::DomainError;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Every failure the HTTP surface can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Token(#[from] TokenValidationError),

    /// The request body is not valid JSON for the expected shape.
    #[error("JSON could not be decoded")]
    BadRequest,

    /// An expected path variable is missing. Always a programmer error.
    #[error("inconsistent mapping between route and handler (programmer error)")]
    BadRouting,

    /// An endpoint received a request variant it does not handle.
    #[error("invalid request type, likely bad wiring")]
    BadWiring,
}

impl ApiError {
    /// Fixed mapping from error to HTTP status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Domain(DomainError::NotFound) => StatusCode::NOT_FOUND,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Domain(DomainError::InvalidBooking) => StatusCode::BAD_REQUEST,
            Self::Domain(DomainError::Unauthorized) => StatusCode::UNAUTHORIZED,
            Self::Token(_) => StatusCode::UNAUTHORIZED,
            Self::Domain(DomainError::Database) | Self::BadRouting | Self::BadWiring => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        json_error(status)
    }
}

/// Error envelope: `{"error": "<status text>"}`. Nothing else leaves the process.
pub fn json_error(status: StatusCode) -> Response {
    let text = status.canonical_reason().unwrap_or("Unknown Error");
    let mut res = (status, json!({ "error": text }).to_string()).into_response();
    res.headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    res
}
