//! In-process mediator: routes commands and queries to their handlers.
//!
//! Callers (HTTP routes) build a request value and hand it to [`Mediator`];
//! they never hold a reference to the handler that serves it.

pub mod handler;
pub mod mediator;
pub mod request;

pub use handler::RequestHandler;
pub use mediator::{Mediator, MediatorError};
pub use request::Request;
