//! Postgres-backed product repository.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | RepositoryError |
//! |------------|----------------------|-----------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | PoolClosed / PoolTimedOut | N/A | `Unavailable` |
//! | Anything else | Any | `Database` |

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use catalog_core::ProductId;
use catalog_products::Product;

use super::{ProductRepository, RepositoryError};

/// Schema for the `products` table (idempotent).
const CREATE_PRODUCTS: &str = include_str!("../../migrations/0001_create_products.sql");

const UNIQUE_VIOLATION: &str = "23505";

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                    RepositoryError::Conflict(db_err.message().to_string())
                } else {
                    RepositoryError::Database(db_err.message().to_string())
                }
            }
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => RepositoryError::Unavailable,
            other => RepositoryError::Database(other.to_string()),
        }
    }
}

/// Product repository over a single `products` table.
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool for `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply the embedded schema. Safe to run on every startup.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_PRODUCTS).execute(&self.pool).await?;
        tracing::info!("products schema ready");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn row_to_product(row: &PgRow) -> Result<Product, RepositoryError> {
    let id: Uuid = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    let price: f64 = row.try_get("price")?;
    let description: Option<String> = row.try_get("description")?;
    Ok(Product::restore(ProductId::from_uuid(id), name, price, description))
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price, description
            FROM products
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_product).collect()
    }

    #[instrument(skip(self, id), fields(product_id = %id), err)]
    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, description
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_product).transpose()
    }

    #[instrument(skip(self, product), fields(product_id = %product.id_typed()), err)]
    async fn add(&self, product: Product) -> Result<Product, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, description)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(product.id_typed().as_uuid())
        .bind(product.name())
        .bind(product.price())
        .bind(product.description())
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id_typed()), err)]
    async fn update(&self, product: Product) -> Result<Option<Product>, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, price = $3, description = $4
            WHERE id = $1
            "#,
        )
        .bind(product.id_typed().as_uuid())
        .bind(product.name())
        .bind(product.price())
        .bind(product.description())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            Ok(None)
        } else {
            Ok(Some(product))
        }
    }

    #[instrument(skip(self, id), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
