//! Dry-run request handler.
//!
//! No execution engine is linked into this binary. [`DryRunHandler`] answers
//! every mapped request with its own JSON rendering, which makes the server a
//! conformance probe for the mapping layer.

use twinstack_http::dispatch::{HandlerFuture, RequestHandler};
use twinstack_model::error::HandlerError;
use twinstack_model::request::DomainRequest;
use twinstack_model::response::DomainResponse;

/// Echoes the mapped domain request.
#[derive(Debug, Clone, Default)]
pub struct DryRunHandler;

impl RequestHandler for DryRunHandler {
    fn execute(&self, request: DomainRequest) -> HandlerFuture {
        Box::pin(async move {
            let value = serde_json::to_value(&request).map_err(|e| {
                HandlerError::internal_error(format!(
                    "failed to render {}: {e}",
                    request.operation_name()
                ))
            })?;
            tracing::debug!(operation = request.operation_name(), "dry-run execution");
            Ok(DomainResponse::json(value))
        })
    }
}
