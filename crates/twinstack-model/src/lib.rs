//! Domain model for the twinstack HTTP mapping layer.
//!
//! This crate holds everything the mapping layer produces or reports, without
//! any HTTP transport code:
//!
//! - [`request`]: the [`DomainRequest`] call descriptor, one case per operation.
//! - [`modifier`]: [`OutputModifier`], its per-route [`OutputModifierConstraints`],
//!   and [`PagingInfo`].
//! - [`types`]: identifiers, element paths, references and the domain objects
//!   carried in request payloads.
//! - [`response`]: the [`DomainResponse`] returned by the execution engine.
//! - [`error`]: [`MappingError`], [`RouteConfigError`] and [`HandlerError`].

// MappingError carries its route context inline; boxing it in every Result
// would add indirection on the hot path for negligible benefit.
#![allow(clippy::result_large_err)]

pub mod error;
pub mod modifier;
pub mod request;
pub mod response;
pub mod types;

pub use error::{ErrorCode, HandlerError, MappingError, RouteConfigError};
pub use modifier::{Content, Extent, Level, OutputModifier, OutputModifierConstraints, PagingInfo};
pub use request::{DomainRequest, SubmodelScope};
pub use response::{DomainResponse, ResponsePayload, ResponseStatus};
pub use types::{ElementPath, InMemoryFile, Key, KeyType, MergePatch, OperationRequest, Reference};
