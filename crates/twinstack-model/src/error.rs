//! Error taxonomy for request mapping and request execution.
//!
//! Mapping errors are per-request client-input failures: nothing here is
//! retried or auto-corrected. Every variant carries enough context (parameter
//! name, raw value, route) to render a precise message at the HTTP boundary.

use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;

/// Boxed error used as the underlying cause of a body decoding failure.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Stable, machine-readable error codes reported in error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// No route matched the request.
    NoRouteMatched,
    /// The path is routed, but not for the request method.
    MethodNotAllowed,
    /// More than one route matched the request.
    AmbiguousRoute,
    /// Unknown or disallowed content modifier.
    UnsupportedContentModifier,
    /// Illegal output modifier value or combination.
    InvalidOutputModifier,
    /// Malformed paging parameter.
    InvalidPagingParameter,
    /// Malformed base64 or base64url identifier.
    InvalidIdentifierEncoding,
    /// Malformed element path.
    InvalidElementPath,
    /// Malformed resource filter parameter.
    InvalidQueryParameter,
    /// Request payload does not decode to the expected shape.
    InvalidBody,
    /// Recognized route without an implementation.
    NotImplemented,
    /// Resource does not exist.
    NotFound,
    /// Resource already exists.
    Conflict,
    /// Unexpected server-side failure.
    InternalError,
}

impl ErrorCode {
    /// Returns the error code as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoRouteMatched => "NoRouteMatched",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::AmbiguousRoute => "AmbiguousRoute",
            Self::UnsupportedContentModifier => "UnsupportedContentModifier",
            Self::InvalidOutputModifier => "InvalidOutputModifier",
            Self::InvalidPagingParameter => "InvalidPagingParameter",
            Self::InvalidIdentifierEncoding => "InvalidIdentifierEncoding",
            Self::InvalidElementPath => "InvalidElementPath",
            Self::InvalidQueryParameter => "InvalidQueryParameter",
            Self::InvalidBody => "InvalidBody",
            Self::NotImplemented => "NotImplemented",
            Self::NotFound => "NotFound",
            Self::Conflict => "Conflict",
            Self::InternalError => "InternalError",
        }
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> StatusCode {
        match self {
            Self::NoRouteMatched | Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::AmbiguousRoute | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            Self::Conflict => StatusCode::CONFLICT,
            Self::UnsupportedContentModifier
            | Self::InvalidOutputModifier
            | Self::InvalidPagingParameter
            | Self::InvalidIdentifierEncoding
            | Self::InvalidElementPath
            | Self::InvalidQueryParameter
            | Self::InvalidBody => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to translate an HTTP request into a [`DomainRequest`](crate::DomainRequest).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MappingError {
    /// No route's method, pattern and predicate matched.
    #[error("no route matches {method} /{path}")]
    NoRouteMatched {
        /// HTTP method of the request.
        method: String,
        /// Request path (leading `/` stripped).
        path: String,
    },

    /// Routes exist for the path, none of them for the request method.
    #[error("method {method} is not allowed on /{path} (allowed: {})", allowed.join(", "))]
    MethodNotAllowed {
        /// HTTP method of the request.
        method: String,
        /// Request path (leading `/` stripped).
        path: String,
        /// Methods routed for the path.
        allowed: Vec<String>,
    },

    /// More than one route matched; the route table is misconfigured.
    #[error("request {method} /{path} matches multiple routes: {}", routes.join(", "))]
    AmbiguousRoute {
        /// HTTP method of the request.
        method: String,
        /// Request path (leading `/` stripped).
        path: String,
        /// Names of every matching route.
        routes: Vec<String>,
    },

    /// Trailing modifier token unknown or not allowed on the route.
    #[error("content modifier '{token}' is not supported by {route}")]
    UnsupportedContentModifier {
        /// The raw token as sent by the client.
        token: String,
        /// Route the request was mapped to.
        route: String,
    },

    /// Individually valid modifier values combined illegally, or unparseable values.
    #[error("invalid output modifier for {route}: {reason}")]
    InvalidOutputModifier {
        /// What is wrong with the modifier.
        reason: String,
        /// Route the request was mapped to.
        route: String,
    },

    /// Non-positive or unparseable paging value.
    #[error("invalid paging parameter {name}='{value}' (must be a positive integer)")]
    InvalidPagingParameter {
        /// Query parameter name.
        name: String,
        /// Raw query parameter value.
        value: String,
    },

    /// Malformed base64 / base64url identifier.
    #[error("invalid {encoding} identifier in '{parameter}': '{token}'")]
    InvalidIdentifierEncoding {
        /// Path or query parameter carrying the identifier.
        parameter: String,
        /// The raw token as sent by the client.
        token: String,
        /// Expected encoding (`base64url` or `base64`).
        encoding: &'static str,
    },

    /// Element path empty or containing empty segments.
    #[error("invalid element path '{path}': {reason}")]
    InvalidElementPath {
        /// Decoded element path.
        path: String,
        /// What is wrong with the path.
        reason: String,
    },

    /// Resource filter parameter could not be decoded.
    #[error("invalid query parameter {name}='{value}': {reason}")]
    InvalidQueryParameter {
        /// Query parameter name.
        name: String,
        /// Raw query parameter value.
        value: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// Payload does not decode to the expected shape.
    #[error("invalid request body: {reason}")]
    InvalidBody {
        /// What was expected.
        reason: String,
        /// Underlying decoder failure, if any.
        #[source]
        source: Option<BoxError>,
    },

    /// Route recognized but not implemented.
    #[error("operation {operation} is not implemented")]
    NotImplemented {
        /// Name of the recognized operation.
        operation: String,
    },
}

impl MappingError {
    /// Create an [`MappingError::InvalidBody`] wrapping an underlying decoder error.
    pub fn invalid_body(reason: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::InvalidBody {
            reason: reason.into(),
            source: Some(source.into()),
        }
    }

    /// Create an [`MappingError::InvalidBody`] without an underlying cause.
    pub fn invalid_body_reason(reason: impl Into<String>) -> Self {
        Self::InvalidBody {
            reason: reason.into(),
            source: None,
        }
    }

    /// Returns the stable error code of this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NoRouteMatched { .. } => ErrorCode::NoRouteMatched,
            Self::MethodNotAllowed { .. } => ErrorCode::MethodNotAllowed,
            Self::AmbiguousRoute { .. } => ErrorCode::AmbiguousRoute,
            Self::UnsupportedContentModifier { .. } => ErrorCode::UnsupportedContentModifier,
            Self::InvalidOutputModifier { .. } => ErrorCode::InvalidOutputModifier,
            Self::InvalidPagingParameter { .. } => ErrorCode::InvalidPagingParameter,
            Self::InvalidIdentifierEncoding { .. } => ErrorCode::InvalidIdentifierEncoding,
            Self::InvalidElementPath { .. } => ErrorCode::InvalidElementPath,
            Self::InvalidQueryParameter { .. } => ErrorCode::InvalidQueryParameter,
            Self::InvalidBody { .. } => ErrorCode::InvalidBody,
            Self::NotImplemented { .. } => ErrorCode::NotImplemented,
        }
    }

    /// Returns the HTTP status code this error maps to.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.code().default_status_code()
    }
}

/// Route table defect detected while building the table at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RouteConfigError {
    /// A path template could not be compiled.
    #[error("route {route}: invalid path template '{template}': {reason}")]
    InvalidTemplate {
        /// Route name.
        route: String,
        /// The offending template.
        template: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Two routes share a name.
    #[error("duplicate route name: {0}")]
    DuplicateRoute(String),

    /// Two predicate-free routes match the same concrete path.
    #[error("routes {first} and {second} both match {method} /{sample}")]
    OverlappingRoutes {
        /// First route name.
        first: String,
        /// Second route name.
        second: String,
        /// Shared HTTP method.
        method: String,
        /// Sample path matched by both.
        sample: String,
    },
}

/// Failure reported by the execution engine while running a domain request.
#[derive(Debug, thiserror::Error)]
#[error("{code}: {message}")]
pub struct HandlerError {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl HandlerError {
    /// Create a new handler error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a `NotImplemented` error for the named operation.
    #[must_use]
    pub fn not_implemented(operation: &str) -> Self {
        Self::new(
            ErrorCode::NotImplemented,
            format!("operation {operation} is not implemented"),
        )
    }

    /// Create an `InternalError`.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Returns the HTTP status code this error maps to.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.code.default_status_code()
    }
}
