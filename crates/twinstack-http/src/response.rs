//! Domain response and error serialization.
//!
//! Successful results become JSON or raw file responses. Every failure, from
//! mapping or from the engine, becomes the same message envelope:
//!
//! ```json
//! {"messages":[{"messageType":"Error","code":"...","text":"...","timestamp":"..."}]}
//! ```

use chrono::{SecondsFormat, Utc};
use http::StatusCode;
use http::header::{ALLOW, CONTENT_DISPOSITION, CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use twinstack_model::error::{ErrorCode, HandlerError, MappingError};
use twinstack_model::response::{DomainResponse, ResponsePayload};
use twinstack_model::types::InMemoryFile;

use crate::body::TwinResponseBody;

/// Media type of JSON payloads and error bodies.
pub const APPLICATION_JSON: &str = "application/json";

/// Trait for converting a result into an HTTP response.
pub trait IntoTwinResponse {
    /// Convert into an HTTP response.
    fn into_twin_response(self) -> http::Response<TwinResponseBody>;
}

impl IntoTwinResponse for DomainResponse {
    fn into_twin_response(self) -> http::Response<TwinResponseBody> {
        let status = self.status.status_code();
        match self.payload {
            ResponsePayload::Empty => empty_response(status),
            ResponsePayload::Json(value) => json_response(status, &value),
            ResponsePayload::File(file) => file_response(status, file),
        }
    }
}

impl IntoTwinResponse for &MappingError {
    fn into_twin_response(self) -> http::Response<TwinResponseBody> {
        let mut response = error_to_response(self.code(), self.status_code(), &self.to_string());
        if let MappingError::MethodNotAllowed { allowed, .. } = self {
            if let Ok(allow) = HeaderValue::from_str(&allowed.join(", ")) {
                response.headers_mut().insert(ALLOW, allow);
            }
        }
        response
    }
}

impl IntoTwinResponse for &HandlerError {
    fn into_twin_response(self) -> http::Response<TwinResponseBody> {
        error_to_response(self.code, self.status_code(), &self.message)
    }
}

#[derive(Debug, Serialize)]
struct MessageEnvelope<'a> {
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Message<'a> {
    message_type: &'static str,
    code: &'static str,
    text: &'a str,
    timestamp: String,
}

/// Build the error envelope response.
#[must_use]
pub fn error_to_response(
    code: ErrorCode,
    status: StatusCode,
    text: &str,
) -> http::Response<TwinResponseBody> {
    let envelope = MessageEnvelope {
        messages: [Message {
            message_type: "Error",
            code: code.as_str(),
            text,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }],
    };
    let body = serde_json::to_vec(&envelope)
        .map(TwinResponseBody::from_bytes)
        .unwrap_or_default();

    // Build the error response - this should not fail for valid status codes.
    http::Response::builder()
        .status(status)
        .header(CONTENT_TYPE, APPLICATION_JSON)
        .body(body)
        .unwrap_or_else(|_| internal_error_response())
}

fn json_response(status: StatusCode, value: &serde_json::Value) -> http::Response<TwinResponseBody> {
    let bytes = match serde_json::to_vec(value) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize response payload");
            return error_to_response(
                ErrorCode::InternalError,
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to serialize response payload",
            );
        }
    };
    http::Response::builder()
        .status(status)
        .header(CONTENT_TYPE, APPLICATION_JSON)
        .body(TwinResponseBody::from_bytes(bytes))
        .unwrap_or_else(|_| internal_error_response())
}

fn file_response(status: StatusCode, file: InMemoryFile) -> http::Response<TwinResponseBody> {
    let content_type = HeaderValue::from_str(&file.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let mut builder = http::Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type);
    // Names that cannot be represented in a header are dropped, not rejected.
    if let Ok(disposition) = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        file.file_name.replace(['"', '\\'], "_")
    )) {
        builder = builder.header(CONTENT_DISPOSITION, disposition);
    }
    builder
        .body(TwinResponseBody::from_bytes(file.content))
        .unwrap_or_else(|_| internal_error_response())
}

fn empty_response(status: StatusCode) -> http::Response<TwinResponseBody> {
    http::Response::builder()
        .status(status)
        .body(TwinResponseBody::empty())
        .unwrap_or_else(|_| internal_error_response())
}

fn internal_error_response() -> http::Response<TwinResponseBody> {
    http::Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .body(TwinResponseBody::empty())
        .expect("static response should be valid")
}
