//! Hand-off from the mapping layer to the execution engine.
//!
//! The engine that actually reads and writes shells, submodels and concept
//! descriptions lives outside this crate. It plugs in through
//! [`RequestHandler`], receiving a fully decoded [`DomainRequest`] and
//! returning a [`DomainResponse`] that the service serializes.

use std::future::Future;
use std::pin::Pin;

use twinstack_model::error::HandlerError;
use twinstack_model::request::DomainRequest;
use twinstack_model::response::DomainResponse;

/// Boxed future returned by [`RequestHandler::execute`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<DomainResponse, HandlerError>> + Send>>;

/// Trait the execution engine must implement.
///
/// # Object Safety
///
/// The future is boxed so the handler can also be used as
/// `Arc<dyn RequestHandler>`.
pub trait RequestHandler: Send + Sync + 'static {
    /// Execute one domain request.
    fn execute(&self, request: DomainRequest) -> HandlerFuture;
}

/// Dispatch a mapped request to the handler.
///
/// Called by [`TwinHttpService`](crate::service::TwinHttpService) after a
/// request has been mapped.
pub async fn dispatch_request<H: RequestHandler + ?Sized>(
    handler: &H,
    request: DomainRequest,
) -> Result<DomainResponse, HandlerError> {
    let operation = request.operation_name();
    tracing::debug!(
        operation,
        scope = ?request.scope(),
        modifier = ?request.output_modifier(),
        "dispatching domain request"
    );
    handler.execute(request).await
}

/// A handler that answers every request with `NotImplemented`.
///
/// Useful for exercising routing and request decoding in isolation.
#[derive(Debug, Clone, Default)]
pub struct NotImplementedHandler;

impl RequestHandler for NotImplementedHandler {
    fn execute(&self, request: DomainRequest) -> HandlerFuture {
        let operation = request.operation_name();
        Box::pin(async move { Err(HandlerError::not_implemented(operation)) })
    }
}
