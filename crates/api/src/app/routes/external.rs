use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Path, RawQuery},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use catalog_infra::handlers::GetExternalResourceQuery;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/*endpoint", get(proxy_get))
}

/// Proxy a GET (path and query string) to the configured external API and relay its body.
pub async fn proxy_get(
    Extension(services): Extension<Arc<AppServices>>,
    Path(endpoint): Path<String>,
    RawQuery(query): RawQuery,
) -> axum::response::Response {
    match services
        .mediator()
        .dispatch(GetExternalResourceQuery { endpoint, query })
        .await
    {
        Ok(res) => {
            let content_type = res
                .content_type
                .unwrap_or_else(|| "text/plain; charset=utf-8".to_string());
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], res.body).into_response()
        }
        Err(e) => errors::app_error_to_response(e),
    }
}
