//! Persistence ports for catalog entities.
//!
//! Domain crates never touch storage; the application services talk to these
//! traits, and deployments pick an implementation (in-memory for tests/dev,
//! Postgres for production).

use std::sync::Arc;

use thiserror::Error;

use catalog_auth::User;
use catalog_core::ProductId;
use catalog_products::Product;

mod in_memory;
mod postgres;

pub use in_memory::{InMemoryProductRepository, InMemoryUserRepository};
pub use postgres::{PostgresProductRepository, PostgresUserRepository, migrate};

/// Repository operation error.
///
/// These are **infrastructure errors** as opposed to domain errors (validation,
/// credentials).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write (e.g. duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found")]
    NotFound,

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Listing direction, by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a query-string value; anything other than `desc` sorts ascending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Listing parameters.
///
/// `page` is 1-based. A zero `page` or `limit` disables pagination and returns
/// every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub sort: SortOrder,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32, sort: SortOrder) -> Self {
        Self { page, limit, sort }
    }

    /// `(offset, limit)` when pagination applies.
    pub fn window(&self) -> Option<(u64, u64)> {
        if self.page == 0 || self.limit == 0 {
            return None;
        }
        let offset = u64::from(self.page - 1) * u64::from(self.limit);
        Some((offset, u64::from(self.limit)))
    }
}

/// Product storage contract.
#[async_trait::async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &Product) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Replace a stored product. `NotFound` if it does not exist.
    async fn update(&self, product: &Product) -> Result<(), StoreError>;

    /// Remove a stored product. `NotFound` if it does not exist.
    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;

    async fn list(&self, query: ListQuery) -> Result<Vec<Product>, StoreError>;
}

/// User storage contract. Email uniqueness is enforced here.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// `Conflict` if the email is already registered.
    async fn create(&self, user: &User) -> Result<(), StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

#[async_trait::async_trait]
impl<S> ProductRepository for Arc<S>
where
    S: ProductRepository + ?Sized,
{
    async fn create(&self, product: &Product) -> Result<(), StoreError> {
        (**self).create(product).await
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).find_by_id(id).await
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        (**self).update(product).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }

    async fn list(&self, query: ListQuery) -> Result<Vec<Product>, StoreError> {
        (**self).list(query).await
    }
}

#[async_trait::async_trait]
impl<S> UserRepository for Arc<S>
where
    S: UserRepository + ?Sized,
{
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        (**self).create(user).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        (**self).find_by_email(email).await
    }
}
