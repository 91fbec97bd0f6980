//! Result of executing a [`DomainRequest`](crate::DomainRequest).

use http::StatusCode;
use serde_json::Value;

use crate::types::InMemoryFile;

/// Outcome category of a successful execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseStatus {
    /// Request succeeded and returns a payload.
    #[default]
    Success,
    /// A resource was created.
    Created,
    /// An asynchronous operation was accepted.
    Accepted,
    /// Request succeeded without a payload.
    NoContent,
}

impl ResponseStatus {
    /// Returns the HTTP status code for this outcome.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Created => StatusCode::CREATED,
            Self::Accepted => StatusCode::ACCEPTED,
            Self::NoContent => StatusCode::NO_CONTENT,
        }
    }
}

/// Response payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResponsePayload {
    /// No body.
    #[default]
    Empty,
    /// JSON document.
    Json(Value),
    /// Raw file content.
    File(InMemoryFile),
}

/// Response returned by the execution engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DomainResponse {
    /// Outcome category.
    pub status: ResponseStatus,
    /// Body.
    pub payload: ResponsePayload,
}

impl DomainResponse {
    /// `200 OK` with a JSON body.
    #[must_use]
    pub fn json(value: Value) -> Self {
        Self {
            status: ResponseStatus::Success,
            payload: ResponsePayload::Json(value),
        }
    }

    /// `201 Created` with a JSON body.
    #[must_use]
    pub fn created(value: Value) -> Self {
        Self {
            status: ResponseStatus::Created,
            payload: ResponsePayload::Json(value),
        }
    }

    /// `204 No Content`.
    #[must_use]
    pub fn no_content() -> Self {
        Self {
            status: ResponseStatus::NoContent,
            payload: ResponsePayload::Empty,
        }
    }

    /// `200 OK` with a file body.
    #[must_use]
    pub fn file(file: InMemoryFile) -> Self {
        Self {
            status: ResponseStatus::Success,
            payload: ResponsePayload::File(file),
        }
    }
}
