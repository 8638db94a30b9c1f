//! Product use cases: one method per operation, each delegating to the repository.

use tracing::instrument;

use catalog_core::ProductId;
use catalog_products::{Product, ProductDraft};

use crate::error::{AppError, AppResult};
use crate::repository::ProductRepository;

#[derive(Debug)]
pub struct ProductUseCases<R> {
    repository: R,
}

impl<R> ProductUseCases<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<R: ProductRepository> ProductUseCases<R> {
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.repository.list().await?)
    }

    pub async fn get_product(&self, id: ProductId) -> AppResult<Product> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(AppError::not_found)
    }

    #[instrument(skip(self, draft))]
    pub async fn create_product(&self, draft: ProductDraft) -> AppResult<Product> {
        let draft = draft.validated()?;
        let product = self
            .repository
            .add(Product::from_draft(ProductId::new(), draft))
            .await?;
        tracing::info!(product_id = %product.id_typed(), "product created");
        Ok(product)
    }

    #[instrument(skip(self, id, draft), fields(product_id = %id))]
    pub async fn update_product(&self, id: ProductId, draft: ProductDraft) -> AppResult<Product> {
        let draft = draft.validated()?;
        let product = self
            .repository
            .update(Product::from_draft(id, draft))
            .await?
            .ok_or_else(AppError::not_found)?;
        tracing::info!("product updated");
        Ok(product)
    }

    /// Delete a product. Deleting an unknown id is a no-op and returns `false`.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> AppResult<bool> {
        if self.repository.get(id).await?.is_none() {
            tracing::debug!("delete of unknown product ignored");
            return Ok(false);
        }
        let removed = self.repository.delete(id).await?;
        tracing::info!("product deleted");
        Ok(removed)
    }
}
