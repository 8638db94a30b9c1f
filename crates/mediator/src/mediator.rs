use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::Instrument;

use crate::{Request, RequestHandler};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediatorError {
    /// No handler was registered for the request type.
    #[error("no handler registered for {0}")]
    HandlerNotFound(&'static str),
}

/// Type-erased `Arc<dyn RequestHandler<R>>`, keyed by `TypeId::of::<R>()`.
type ErasedHandler = Box<dyn Any + Send + Sync>;

/// Request router.
///
/// Built once at startup (`register` takes `&mut self`), then shared read-only
/// behind an `Arc` by every request task.
#[derive(Default)]
pub struct Mediator {
    handlers: HashMap<TypeId, ErasedHandler>,
}

impl Mediator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for request type `R`, replacing any previous one.
    pub fn register<R, H>(&mut self, handler: H) -> &mut Self
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        let handler: Arc<dyn RequestHandler<R>> = Arc::new(handler);
        if self
            .handlers
            .insert(TypeId::of::<R>(), Box::new(handler))
            .is_some()
        {
            tracing::debug!(request = type_name::<R>(), "replaced mediator handler");
        }
        self
    }

    pub fn is_registered<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    /// Number of registered request types.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Route `request` to its handler and return the handler's response.
    pub async fn send<R: Request>(&self, request: R) -> Result<R::Response, MediatorError> {
        let handler = self.handler::<R>()?;
        let span = tracing::debug_span!("mediator.send", request = type_name::<R>());
        Ok(handler.handle(request).instrument(span).await)
    }

    /// Like [`send`](Self::send), for requests whose response is already a
    /// `Result`: a missing handler is folded into the request's own error type.
    pub async fn dispatch<R, T, E>(&self, request: R) -> Result<T, E>
    where
        R: Request<Response = Result<T, E>>,
        T: Send + 'static,
        E: From<MediatorError> + Send + 'static,
    {
        self.send(request).await.map_err(E::from)?
    }

    fn handler<R: Request>(&self) -> Result<Arc<dyn RequestHandler<R>>, MediatorError> {
        self.handlers
            .get(&TypeId::of::<R>())
            .and_then(|h| h.downcast_ref::<Arc<dyn RequestHandler<R>>>())
            .cloned()
            .ok_or(MediatorError::HandlerNotFound(type_name::<R>()))
    }
}

impl core::fmt::Debug for Mediator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mediator")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
