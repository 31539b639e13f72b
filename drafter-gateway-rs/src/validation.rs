//! Request validation for the drafter gateway
//!
//! Content-type and body checks that run before the pipeline sees a request.
//! Every failure is reported as `{"error": ..., "code": ...}`.

use axum::extract::rejection::BytesRejection;
use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use drafting_rs::GenerateRequest;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Invalid request format: {0}")]
    InvalidFormat(String),

    #[error("Content type must be {0}")]
    ContentType(String),

    #[error("Request payload too large: {0}")]
    PayloadTooLarge(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            Self::ContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        log::warn!("Rejected request ({}): {}", status.as_u16(), self);
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
                code: status.as_u16(),
            }),
        )
            .into_response()
    }
}

/// Require a JSON content type (parameters such as charset are allowed).
pub fn validate_content_type(headers: &HeaderMap) -> Result<(), GatewayError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if !content_type.trim().to_ascii_lowercase().starts_with("application/json") {
        return Err(GatewayError::ContentType(format!(
            "'application/json', got '{}'",
            content_type
        )));
    }
    Ok(())
}

/// Map a body read failure; the only 413 comes from the size limit.
pub fn body_rejection(rejection: BytesRejection) -> GatewayError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        GatewayError::PayloadTooLarge(rejection.body_text())
    } else {
        GatewayError::InvalidFormat(format!("Failed to read request body: {}", rejection.body_text()))
    }
}

/// Decode a generate request. Unknown fields are ignored; any field may be absent.
pub fn parse_generate_request(body: &[u8]) -> Result<GenerateRequest, GatewayError> {
    serde_json::from_slice(body).map_err(|e| GatewayError::InvalidFormat(e.to_string()))
}
