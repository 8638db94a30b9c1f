use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use catalog_core::{Entity, ProductId};
use catalog_products::Product;

use super::{ProductRepository, RepositoryError, sort_for_listing};

/// In-memory product store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let map = self.inner.read().map_err(|_| RepositoryError::Unavailable)?;
        let mut products: Vec<Product> = map.values().cloned().collect();
        sort_for_listing(&mut products);
        Ok(products)
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let map = self.inner.read().map_err(|_| RepositoryError::Unavailable)?;
        Ok(map.get(&id).cloned())
    }

    async fn add(&self, product: Product) -> Result<Product, RepositoryError> {
        let mut map = self.inner.write().map_err(|_| RepositoryError::Unavailable)?;
        let id = *product.id();
        if map.contains_key(&id) {
            return Err(RepositoryError::Conflict(format!("product {id} already exists")));
        }
        map.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> Result<Option<Product>, RepositoryError> {
        let mut map = self.inner.write().map_err(|_| RepositoryError::Unavailable)?;
        match map.get_mut(product.id()) {
            Some(slot) => {
                *slot = product.clone();
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let mut map = self.inner.write().map_err(|_| RepositoryError::Unavailable)?;
        Ok(map.remove(&id).is_some())
    }
}
