use async_trait::async_trait;

use crate::Request;

/// Handles one request type.
///
/// Handlers are registered with a [`Mediator`](crate::Mediator) and shared
/// across requests, so they must be `Send + Sync` and take `&self`.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(&self, request: R) -> R::Response;
}
