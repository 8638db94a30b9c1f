use axum::Router;

pub mod external;
pub mod products;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/product", products::router())
        .nest("/externalapi", external::router())
}
