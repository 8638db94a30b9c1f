use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use catalog_core::ProductId;
use catalog_infra::handlers::{
    CreateProductCommand, DeleteProductCommand, GetProductByIdQuery, GetProductsQuery,
    UpdateProductCommand,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn parse_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"))
}

fn body_rejection(rej: JsonRejection) -> axum::response::Response {
    errors::json_error(StatusCode::BAD_REQUEST, "validation_error", rej.body_text())
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.mediator().dispatch(GetProductsQuery).await {
        Ok(products) => {
            let items = products
                .into_iter()
                .map(dto::ProductDto::from)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::app_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateProductDto>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rej) => return body_rejection(rej),
    };

    let cmd = CreateProductCommand { draft: body.into() };
    match services.mediator().dispatch(cmd).await {
        Ok(product) => (StatusCode::CREATED, Json(dto::ProductDto::from(product))).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.mediator().dispatch(GetProductByIdQuery { id }).await {
        Ok(product) => (StatusCode::OK, Json(dto::ProductDto::from(product))).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateProductDto>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rej) => return body_rejection(rej),
    };

    let cmd = UpdateProductCommand {
        id,
        draft: body.into(),
    };
    match services.mediator().dispatch(cmd).await {
        Ok(product) => (StatusCode::OK, Json(dto::ProductDto::from(product))).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}

/// Always 204 on success: deleting an unknown product is a no-op.
pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.mediator().dispatch(DeleteProductCommand { id }).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}
