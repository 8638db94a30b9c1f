//! Infrastructure layer: repositories, use cases, mediator handlers, config,
//! external service clients.

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod repository;
pub mod use_cases;

pub use error::{AppError, AppResult};
