use std::collections::HashMap;
use std::sync::RwLock;

use catalog_auth::User;
use catalog_core::ProductId;
use catalog_products::Product;

use super::{ListQuery, ProductRepository, SortOrder, StoreError, UserRepository};

fn poisoned() -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

/// In-memory product store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    rows: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: &Product) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let id = product.id_typed();
        if rows.contains_key(&id) {
            return Err(StoreError::Conflict(format!("product {id} already exists")));
        }
        rows.insert(id, product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;
        Ok(rows.get(&id).cloned())
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        match rows.get_mut(&product.id_typed()) {
            Some(row) => {
                *row = product.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    async fn list(&self, query: ListQuery) -> Result<Vec<Product>, StoreError> {
        let rows = self.rows.read().map_err(|_| poisoned())?;

        let mut items: Vec<Product> = rows.values().cloned().collect();
        items.sort_by_key(|p| (p.created_at(), p.id_typed()));
        if query.sort == SortOrder::Desc {
            items.reverse();
        }

        Ok(match query.window() {
            Some((offset, limit)) => items
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect(),
            None => items,
        })
    }
}

/// In-memory user store keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    by_email: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        let mut by_email = self.by_email.write().map_err(|_| poisoned())?;
        if by_email.contains_key(user.email()) {
            return Err(StoreError::Conflict("email already registered".to_string()));
        }
        by_email.insert(user.email().to_string(), user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let by_email = self.by_email.read().map_err(|_| poisoned())?;
        Ok(by_email.get(email).cloned())
    }
}
