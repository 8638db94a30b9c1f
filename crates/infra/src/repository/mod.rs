//! Product persistence: repository trait + in-memory and Postgres backends.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_core::ProductId;
use catalog_products::Product;

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductRepository;
pub use postgres::PostgresProductRepository;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A record with the same key already exists.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The backing database rejected or failed the operation.
    #[error("database error: {0}")]
    Database(String),
    /// The backing store cannot be reached (closed/exhausted pool, poisoned lock).
    #[error("store unavailable")]
    Unavailable,
}

/// Storage abstraction for catalog products.
///
/// Every method is a single round-trip to the backing store; no business
/// rules live here.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ordered by name then id.
    async fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Insert a new product. A duplicate id is a `Conflict`.
    async fn add(&self, product: Product) -> Result<Product, RepositoryError>;

    /// Replace the stored record. Returns `None` when `product.id` is unknown.
    async fn update(&self, product: Product) -> Result<Option<Product>, RepositoryError>;

    /// Remove a product. Returns whether a record was removed.
    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError>;
}

#[async_trait]
impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        (**self).list().await
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        (**self).get(id).await
    }

    async fn add(&self, product: Product) -> Result<Product, RepositoryError> {
        (**self).add(product).await
    }

    async fn update(&self, product: Product) -> Result<Option<Product>, RepositoryError> {
        (**self).update(product).await
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        (**self).delete(id).await
    }
}

/// Ordering used by `list()` on every backend.
pub(crate) fn sort_for_listing(products: &mut [Product]) {
    products.sort_by(|a, b| {
        a.name()
            .cmp(b.name())
            .then_with(|| a.id_typed().cmp(&b.id_typed()))
    });
}
