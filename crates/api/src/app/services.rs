//! Service wiring: picks the storage backend and builds the application services.

use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use catalog_auth::{CredentialHasher, TokenIssuer};
use catalog_infra::{
    AccountService, CatalogService, InMemoryProductRepository, InMemoryUserRepository,
    PostgresProductRepository, PostgresUserRepository, ProductRepository, UserRepository,
    repository::migrate,
};

use crate::config::ApiConfig;

const MAX_DB_CONNECTIONS: u32 = 10;

pub type DynProducts = Arc<dyn ProductRepository>;
pub type DynUsers = Arc<dyn UserRepository>;

/// Shared services injected into every handler.
pub struct AppServices {
    pub catalog: CatalogService<DynProducts>,
    pub accounts: AccountService<DynUsers>,
}

impl AppServices {
    pub fn new(
        products: DynProducts,
        users: DynUsers,
        hasher: CredentialHasher,
        issuer: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            catalog: CatalogService::new(products),
            accounts: AccountService::new(users, hasher, issuer),
        }
    }

    /// Process-local stores; contents vanish on restart.
    pub fn in_memory(hasher: CredentialHasher, issuer: Arc<TokenIssuer>) -> Self {
        Self::new(
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            hasher,
            issuer,
        )
    }

    pub fn postgres(
        pool: sqlx::PgPool,
        hasher: CredentialHasher,
        issuer: Arc<TokenIssuer>,
    ) -> Self {
        Self::new(
            Arc::new(PostgresProductRepository::new(pool.clone())),
            Arc::new(PostgresUserRepository::new(pool)),
            hasher,
            issuer,
        )
    }
}

pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let issuer = TokenIssuer::new(config.signing_config()).context("invalid JWT settings")?;
    let issuer = Arc::new(issuer);
    let hasher = CredentialHasher::default();

    match config.database_url.as_deref() {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(MAX_DB_CONNECTIONS)
                .connect(url)
                .await
                .context("failed to connect to DATABASE_URL")?;
            migrate(&pool).await.context("failed to migrate schema")?;

            tracing::info!("using postgres storage");
            Ok(AppServices::postgres(pool, hasher, issuer))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory storage");
            Ok(AppServices::in_memory(hasher, issuer))
        }
    }
}
