//! HTTP route table, request mapping, response serialization, and hyper
//! service for the twinstack digital-twin API.
//!
//! This crate turns HTTP requests against shell, submodel and concept
//! description resources into typed [`DomainRequest`](twinstack_model::DomainRequest)
//! values. It handles:
//!
//! - **Patterns** ([`pattern`]): Composes route templates with the optional
//!   `shells/{aasId}/aas` context prefix and the `$content` modifier suffix.
//!
//! - **Routing** ([`router`], [`routes`]): The declarative route catalogue,
//!   validated once at startup and resolved per request by method, path and
//!   query predicates.
//!
//! - **Codecs** ([`codec`], [`modifier`], [`payload`], [`multipart`]):
//!   Identifier and element path decoding, output modifier and paging
//!   assembly, and request body decoding.
//!
//! - **Dispatch** ([`dispatch`]): Hands mapped requests to the execution engine
//!   via the [`RequestHandler`](dispatch::RequestHandler) trait.
//!
//! - **Service** ([`service`]): The [`TwinHttpService`](service::TwinHttpService)
//!   implementing hyper's `Service` trait.
//!
//! # Architecture
//!
//! ```text
//! HTTP Request
//!   -> TwinHttpService (hyper Service)
//!     -> Health check / OPTIONS interception
//!     -> Path prefix stripping
//!     -> RouteTable::resolve (method + pattern + predicate)
//!     -> Body collection
//!     -> RouteTable::parse (identifiers, modifiers, paging, body)
//!     -> dispatch_request (RequestHandler trait)
//!     -> Common response headers (x-request-id, Server)
//!   <- HTTP Response
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use twinstack_http::config::HttpEndpointConfig;
//! use twinstack_http::dispatch::NotImplementedHandler;
//! use twinstack_http::service::TwinHttpService;
//!
//! let service = TwinHttpService::new(NotImplementedHandler, HttpEndpointConfig::default())
//!     .expect("shipped route table is valid");
//! // Use `service` with hyper server.
//! ```

// MappingError is used pervasively as Result<T, MappingError>; its size is
// inherent to the route context it carries.
#![allow(clippy::result_large_err)]

pub mod body;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod modifier;
pub mod multipart;
pub mod pattern;
pub mod payload;
pub mod request;
pub mod response;
pub mod router;
pub mod routes;
pub mod service;

// Re-export key types for convenience.
pub use body::TwinResponseBody;
pub use codec::{IdentifierEncoding, decode_identifier, encode_identifier, parse_element_path};
pub use config::HttpEndpointConfig;
pub use dispatch::{HandlerFuture, NotImplementedHandler, RequestHandler};
pub use pattern::{ApiGeneration, RoutePattern};
pub use request::HttpRequest;
pub use response::IntoTwinResponse;
pub use router::{RouteConfig, RouteDescriptor, RouteSpec, RouteTable};
pub use service::TwinHttpService;
