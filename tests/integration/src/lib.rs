//! Integration tests for the twinstack HTTP mapping layer.
//!
//! Most tests drive the shipped route table and the hyper-free service path
//! in process. Tests against a live server at `localhost:8080` are marked
//! `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p twinstack-integration -- --ignored
//! ```

use std::sync::{LazyLock, Once};

use bytes::Bytes;
use http::Method;
use http_body_util::{BodyExt, Full};
use twinstack_http::config::HttpEndpointConfig;
use twinstack_http::dispatch::{HandlerFuture, RequestHandler};
use twinstack_http::request::HttpRequest;
use twinstack_http::router::{RouteConfig, RouteTable};
use twinstack_http::service::TwinHttpService;
use twinstack_model::error::{HandlerError, MappingError};
use twinstack_model::request::DomainRequest;
use twinstack_model::response::DomainResponse;

pub use twinstack_http::codec::encode_identifier;

static INIT: Once = Once::new();

static ROUTES: LazyLock<RouteTable> =
    LazyLock::new(|| RouteTable::new(RouteConfig::default()).expect("shipped route table is valid"));

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// The shipped route table with default configuration.
#[must_use]
pub fn routes() -> &'static RouteTable {
    init_tracing();
    &ROUTES
}

/// Map a bodiless request.
pub fn map(method: Method, path_and_query: &str) -> Result<DomainRequest, MappingError> {
    routes().map(&HttpRequest::new(method, path_and_query))
}

/// Map a request with a JSON body.
pub fn map_json(
    method: Method,
    path_and_query: &str,
    body: &serde_json::Value,
) -> Result<DomainRequest, MappingError> {
    let request = HttpRequest::new(method, path_and_query)
        .with_header(http::header::CONTENT_TYPE, "application/json")
        .with_body(body.to_string());
    routes().map(&request)
}

/// Base64url-encode a JSON value for use as a query parameter.
#[must_use]
pub fn encode_json(value: &serde_json::Value) -> String {
    encode_identifier(&value.to_string())
}

/// Answers every request with its own JSON rendering.
#[derive(Debug, Clone, Default)]
pub struct EchoHandler;

impl RequestHandler for EchoHandler {
    fn execute(&self, request: DomainRequest) -> HandlerFuture {
        Box::pin(async move {
            serde_json::to_value(&request)
                .map(DomainResponse::json)
                .map_err(|e| HandlerError::internal_error(e.to_string()))
        })
    }
}

/// A service over [`EchoHandler`].
#[must_use]
pub fn echo_service(config: HttpEndpointConfig) -> TwinHttpService<EchoHandler> {
    init_tracing();
    TwinHttpService::new(EchoHandler, config).expect("shipped route table is valid")
}

/// Send a request through `service` and return status, headers and body.
pub async fn call(
    service: &TwinHttpService<EchoHandler>,
    request: http::Request<Bytes>,
) -> (http::StatusCode, http::HeaderMap, Bytes) {
    let (parts, body) = request.into_parts();
    let response = service
        .handle(http::Request::from_parts(parts, Full::new(body)))
        .await;
    let (parts, body) = response.into_parts();
    let bytes = body
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    (parts.status, parts.headers, bytes)
}

/// Endpoint URL for a live server.
#[must_use]
pub fn endpoint_url() -> String {
    std::env::var("TWINSTACK_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:8080".to_owned())
}

mod test_addressing;
mod test_bodies;
mod test_live;
mod test_modifiers;
mod test_operations;
mod test_paging;
mod test_scenarios;
mod test_service;
