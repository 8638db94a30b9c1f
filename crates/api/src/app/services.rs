use std::sync::Arc;

use anyhow::Context;

use catalog_infra::{
    config::AppConfig,
    external::ExternalApiClient,
    handlers::{register_external_handlers, register_product_handlers},
    repository::{InMemoryProductRepository, PostgresProductRepository, ProductRepository},
    use_cases::ProductUseCases,
};
use catalog_mediator::Mediator;

/// Which repository backs the product handlers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Backend {
    InMemory,
    Postgres,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::InMemory => "in_memory",
            Backend::Postgres => "postgres",
        }
    }
}

/// Everything a route needs: the mediator, with all handlers registered.
#[derive(Debug)]
pub struct AppServices {
    mediator: Mediator,
    backend: Backend,
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory(external: ExternalApiClient) -> Self {
        Self::wire(InMemoryProductRepository::new(), external, Backend::InMemory)
    }

    /// Postgres when `DATABASE_URL` is configured, in-memory otherwise.
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let external = ExternalApiClient::new(
            config.external_api.base_url.clone(),
            config.external_api.timeout,
        )
        .context("failed to build external api client")?;

        match &config.database {
            Some(db) => {
                let repository = PostgresProductRepository::connect(&db.url, db.max_connections)
                    .await
                    .context("failed to connect to Postgres")?;
                repository
                    .migrate()
                    .await
                    .context("failed to apply products schema")?;
                tracing::info!("using postgres product repository");
                Ok(Self::wire(repository, external, Backend::Postgres))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using in-memory product repository");
                Ok(Self::in_memory(external))
            }
        }
    }

    fn wire<R>(repository: R, external: ExternalApiClient, backend: Backend) -> Self
    where
        R: ProductRepository + 'static,
    {
        let mut mediator = Mediator::new();
        register_product_handlers(&mut mediator, Arc::new(ProductUseCases::new(repository)));
        register_external_handlers(&mut mediator, Arc::new(external));
        Self { mediator, backend }
    }

    pub fn mediator(&self) -> &Mediator {
        &self.mediator
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }
}
