//! The twinstack HTTP service implementing hyper's `Service` trait.
//!
//! [`TwinHttpService`] ties together routing, request mapping, dispatch, and
//! response serialization into a single hyper-compatible service. It handles:
//!
//! 1. Health check interception (`GET /health`)
//! 2. `OPTIONS` requests, answered with the `Allow` set of the path
//! 3. Path prefix stripping
//! 4. Route resolution via [`RouteTable`]
//! 5. Request body collection
//! 6. Mapping into a [`DomainRequest`](twinstack_model::request::DomainRequest)
//! 7. Dispatch to the [`RequestHandler`]
//! 8. Common response headers (`x-request-id`, `Server`)
//! 9. Error response formatting

use std::convert::Infallible;
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{ALLOW, HeaderValue, SERVER};
use http::{Method, StatusCode};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::service::Service;
use tracing::{debug, error, info, warn};
use twinstack_model::error::{ErrorCode, MappingError, RouteConfigError};
use uuid::Uuid;

use crate::body::TwinResponseBody;
use crate::config::HttpEndpointConfig;
use crate::dispatch::{RequestHandler, dispatch_request};
use crate::pattern::is_contextualized;
use crate::request::{HttpRequest, normalize_path};
use crate::response::{IntoTwinResponse, error_to_response};
use crate::router::RouteTable;

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The twinstack HTTP service.
///
/// # Type Parameters
///
/// - `H`: The execution engine implementing [`RequestHandler`].
#[derive(Debug)]
pub struct TwinHttpService<H: RequestHandler> {
    handler: Arc<H>,
    routes: Arc<RouteTable>,
    config: Arc<HttpEndpointConfig>,
}

impl<H: RequestHandler> TwinHttpService<H> {
    /// Create a service, building the route table from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteConfigError`] if the route table fails validation.
    pub fn new(handler: H, config: HttpEndpointConfig) -> Result<Self, RouteConfigError> {
        let routes = RouteTable::new(config.route_config())?;
        Ok(Self::from_shared(Arc::new(handler), Arc::new(routes), config))
    }

    /// Create a service from an already shared handler and route table.
    #[must_use]
    pub fn from_shared(handler: Arc<H>, routes: Arc<RouteTable>, config: HttpEndpointConfig) -> Self {
        Self {
            handler,
            routes,
            config: Arc::new(config),
        }
    }

    /// The route table this service maps requests with.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Run one request through the full pipeline.
    ///
    /// Generic over the request body so the pipeline can be driven without a
    /// live connection.
    pub async fn handle<B>(&self, req: http::Request<B>) -> http::Response<TwinResponseBody>
    where
        B: http_body::Body<Data = Bytes>,
        B::Error: Display,
    {
        let request_id = Uuid::new_v4().to_string();
        let response = process_request(
            req,
            self.handler.as_ref(),
            &self.routes,
            &self.config,
            &request_id,
        )
        .await;
        add_common_headers(response, &request_id)
    }
}

impl<H: RequestHandler> Clone for TwinHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            routes: Arc::clone(&self.routes),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H: RequestHandler> Service<http::Request<Incoming>> for TwinHttpService<H> {
    type Response = http::Response<TwinResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { Ok(service.handle(req).await) })
    }
}

/// Process an incoming HTTP request through the mapping pipeline.
async fn process_request<H, B>(
    req: http::Request<B>,
    handler: &H,
    routes: &RouteTable,
    config: &HttpEndpointConfig,
    request_id: &str,
) -> http::Response<TwinResponseBody>
where
    H: RequestHandler,
    B: http_body::Body<Data = Bytes>,
    B::Error: Display,
{
    let method = req.method().clone();
    let uri = req.uri().clone();
    debug!(%method, %uri, request_id, "processing request");

    // 1. Health check interception.
    if is_health_check(&method, uri.path()) {
        return health_check_response();
    }

    // 2. OPTIONS.
    if method == Method::OPTIONS {
        return options_response(routes, uri.path(), &config.path_prefix);
    }

    // 3. Route the request (headers and query only, the body is not needed yet).
    let (parts, body) = req.into_parts();
    let Some(mut request) = HttpRequest::from_parts(&parts, Bytes::new(), &config.path_prefix)
    else {
        let err = MappingError::NoRouteMatched {
            method: method.to_string(),
            path: uri.path().to_owned(),
        };
        warn!(%method, %uri, request_id, "request outside the configured path prefix");
        return (&err).into_twin_response();
    };

    let (route, path_match) = match routes.resolve(&request) {
        Ok(resolved) => resolved,
        Err(err) => {
            if matches!(err, MappingError::AmbiguousRoute { .. }) {
                error!(%method, %uri, error = %err, request_id, "ambiguous route table");
            } else {
                warn!(%method, %uri, error = %err, request_id, "failed to route request");
            }
            return (&err).into_twin_response();
        }
    };

    info!(
        route = route.name(),
        contextualized = is_contextualized(&request.path),
        request_id,
        "routed request"
    );

    // 4. Collect body.
    request.body = match collect_body(body).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(error = %err, request_id, "failed to collect request body");
            return error_to_response(
                ErrorCode::InternalError,
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to read request body",
            );
        }
    };

    // 5. Map into a domain request.
    let domain_request = match routes.parse(route, path_match, &request) {
        Ok(domain_request) => domain_request,
        Err(err) => {
            warn!(route = route.name(), error = %err, request_id, "failed to map request");
            return (&err).into_twin_response();
        }
    };

    // 6. Dispatch to handler.
    match dispatch_request(handler, domain_request).await {
        Ok(response) => response.into_twin_response(),
        Err(err) => {
            debug!(error = %err, request_id, "domain request returned error");
            (&err).into_twin_response()
        }
    }
}

/// Collect the full body into `Bytes`.
async fn collect_body<B>(body: B) -> Result<Bytes, B::Error>
where
    B: http_body::Body<Data = Bytes>,
{
    let collected = body.collect().await?;
    Ok(collected.to_bytes())
}

/// Check if the request is a health check probe.
fn is_health_check(method: &Method, path: &str) -> bool {
    *method == Method::GET && path == "/health"
}

/// Produce a health check response.
fn health_check_response() -> http::Response<TwinResponseBody> {
    http::Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(TwinResponseBody::from_string(r#"{"status":"running"}"#))
        .expect("static health response should be valid")
}

/// Answer `OPTIONS` with the methods of every route matching the path.
fn options_response(routes: &RouteTable, raw_path: &str, prefix: &str) -> http::Response<TwinResponseBody> {
    let methods = normalize_path(raw_path, prefix)
        .map(|path| routes.allowed_methods(&path))
        .unwrap_or_default();
    if methods.is_empty() {
        let err = MappingError::NoRouteMatched {
            method: Method::OPTIONS.to_string(),
            path: raw_path.to_owned(),
        };
        return (&err).into_twin_response();
    }

    let allow = methods
        .iter()
        .map(Method::as_str)
        .chain(std::iter::once(Method::OPTIONS.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    http::Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(ALLOW, allow)
        .body(TwinResponseBody::empty())
        .unwrap_or_else(|_| {
            http::Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(TwinResponseBody::empty())
                .expect("static response should be valid")
        })
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<TwinResponseBody>,
    request_id: &str,
) -> http::Response<TwinResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, hv);
    }
    headers.insert(SERVER, HeaderValue::from_static("TwinStack"));

    response
}
