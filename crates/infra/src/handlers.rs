//! Mediator commands/queries for the catalog and the handlers that serve them.
//!
//! Each handler forwards to exactly one use-case method (or the external client).

use std::sync::Arc;

use async_trait::async_trait;

use catalog_core::ProductId;
use catalog_mediator::{Mediator, Request, RequestHandler};
use catalog_products::{Product, ProductDraft};

use crate::error::{AppError, AppResult};
use crate::external::{ExternalApiClient, ExternalResponse};
use crate::repository::ProductRepository;
use crate::use_cases::ProductUseCases;

// -------------------------
// Queries
// -------------------------

#[derive(Debug, Clone, Default)]
pub struct GetProductsQuery;

impl Request for GetProductsQuery {
    type Response = AppResult<Vec<Product>>;
}

#[derive(Debug, Clone)]
pub struct GetProductByIdQuery {
    pub id: ProductId,
}

impl Request for GetProductByIdQuery {
    type Response = AppResult<Product>;
}

#[derive(Debug, Clone)]
pub struct GetExternalResourceQuery {
    pub endpoint: String,
    /// Raw query string forwarded unchanged, without the leading `?`.
    pub query: Option<String>,
}

impl Request for GetExternalResourceQuery {
    type Response = AppResult<ExternalResponse>;
}

// -------------------------
// Commands
// -------------------------

#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub draft: ProductDraft,
}

impl Request for CreateProductCommand {
    type Response = AppResult<Product>;
}

#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub id: ProductId,
    pub draft: ProductDraft,
}

impl Request for UpdateProductCommand {
    type Response = AppResult<Product>;
}

#[derive(Debug, Clone)]
pub struct DeleteProductCommand {
    pub id: ProductId,
}

impl Request for DeleteProductCommand {
    /// Whether a product was actually removed.
    type Response = AppResult<bool>;
}

// -------------------------
// Handlers
// -------------------------

/// Serves every product command and query from one shared set of use cases.
pub struct ProductHandler<R> {
    use_cases: Arc<ProductUseCases<R>>,
}

impl<R> ProductHandler<R> {
    pub fn new(use_cases: Arc<ProductUseCases<R>>) -> Self {
        Self { use_cases }
    }
}

impl<R> Clone for ProductHandler<R> {
    fn clone(&self) -> Self {
        Self {
            use_cases: self.use_cases.clone(),
        }
    }
}

#[async_trait]
impl<R: ProductRepository + 'static> RequestHandler<GetProductsQuery> for ProductHandler<R> {
    async fn handle(&self, _request: GetProductsQuery) -> AppResult<Vec<Product>> {
        self.use_cases.list_products().await
    }
}

#[async_trait]
impl<R: ProductRepository + 'static> RequestHandler<GetProductByIdQuery> for ProductHandler<R> {
    async fn handle(&self, request: GetProductByIdQuery) -> AppResult<Product> {
        self.use_cases.get_product(request.id).await
    }
}

#[async_trait]
impl<R: ProductRepository + 'static> RequestHandler<CreateProductCommand> for ProductHandler<R> {
    async fn handle(&self, request: CreateProductCommand) -> AppResult<Product> {
        self.use_cases.create_product(request.draft).await
    }
}

#[async_trait]
impl<R: ProductRepository + 'static> RequestHandler<UpdateProductCommand> for ProductHandler<R> {
    async fn handle(&self, request: UpdateProductCommand) -> AppResult<Product> {
        self.use_cases.update_product(request.id, request.draft).await
    }
}

#[async_trait]
impl<R: ProductRepository + 'static> RequestHandler<DeleteProductCommand> for ProductHandler<R> {
    async fn handle(&self, request: DeleteProductCommand) -> AppResult<bool> {
        self.use_cases.delete_product(request.id).await
    }
}

pub struct ExternalResourceHandler {
    client: Arc<ExternalApiClient>,
}

impl ExternalResourceHandler {
    pub fn new(client: Arc<ExternalApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RequestHandler<GetExternalResourceQuery> for ExternalResourceHandler {
    async fn handle(&self, request: GetExternalResourceQuery) -> AppResult<ExternalResponse> {
        self.client
            .get(&request.endpoint, request.query.as_deref())
            .await
            .map_err(|e| {
                tracing::warn!(endpoint = %request.endpoint, error = %e, "external api call failed");
                AppError::from(e)
            })
    }
}

// -------------------------
// Registration
// -------------------------

/// Register the five product commands/queries against `use_cases`.
pub fn register_product_handlers<R>(mediator: &mut Mediator, use_cases: Arc<ProductUseCases<R>>)
where
    R: ProductRepository + 'static,
{
    let handler = ProductHandler::new(use_cases);
    mediator
        .register::<GetProductsQuery, _>(handler.clone())
        .register::<GetProductByIdQuery, _>(handler.clone())
        .register::<CreateProductCommand, _>(handler.clone())
        .register::<UpdateProductCommand, _>(handler.clone())
        .register::<DeleteProductCommand, _>(handler);
}

pub fn register_external_handlers(mediator: &mut Mediator, client: Arc<ExternalApiClient>) {
    mediator.register::<GetExternalResourceQuery, _>(ExternalResourceHandler::new(client));
}
