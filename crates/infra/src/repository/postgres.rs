//! Postgres-backed repositories.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Any other | - | `Backend` |
//!
//! Rows that no longer satisfy entity invariants surface as `Backend` errors
//! rather than as half-valid entities.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use catalog_auth::{PasswordDigest, User};
use catalog_core::{ProductId, UserId};
use catalog_products::Product;

use super::{ListQuery, ProductRepository, StoreError, UserRepository};

const UNIQUE_VIOLATION: &str = "23505";

/// Create the catalog tables if they do not exist yet.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            price DOUBLE PRECISION NOT NULL CHECK (price > 0),
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| map_sqlx_error("migrate_products", e))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| map_sqlx_error("migrate_users", e))?;

    Ok(())
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Conflict(format!("{operation}: {}", db.message()));
        }
    }
    StoreError::Backend(format!("{operation}: {err}"))
}

fn product_from_row(row: &PgRow) -> Result<Product, StoreError> {
    let decode = |e: sqlx::Error| StoreError::Backend(format!("decode product row: {e}"));

    let id: Uuid = row.try_get("id").map_err(decode)?;
    let name: String = row.try_get("name").map_err(decode)?;
    let price: f64 = row.try_get("price").map_err(decode)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(decode)?;

    Product::restore(ProductId::from_uuid(id), name, price, created_at)
        .map_err(|e| StoreError::Backend(format!("stored product {id} is invalid: {e}")))
}

fn user_from_row(row: &PgRow) -> Result<User, StoreError> {
    let decode = |e: sqlx::Error| StoreError::Backend(format!("decode user row: {e}"));

    let id: Uuid = row.try_get("id").map_err(decode)?;
    let name: String = row.try_get("name").map_err(decode)?;
    let email: String = row.try_get("email").map_err(decode)?;
    let password: String = row.try_get("password").map_err(decode)?;

    Ok(User::restore(
        UserId::from_uuid(id),
        name,
        email,
        PasswordDigest::from_stored(password),
    ))
}

/// Postgres-backed product repository (`products` table).
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: Arc<PgPool>,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait::async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id_typed()), err)]
    async fn create(&self, product: &Product) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(*product.id_typed().as_uuid())
        .bind(product.name())
        .bind(product.price())
        .bind(product.created_at())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_product", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_product", e))?;

        row.as_ref().map(product_from_row).transpose()
    }

    #[instrument(skip(self, product), fields(product_id = %product.id_typed()), err)]
    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, price = $3
            WHERE id = $1
            "#,
        )
        .bind(*product.id_typed().as_uuid())
        .bind(product.name())
        .bind(product.price())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_product", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn list(&self, query: ListQuery) -> Result<Vec<Product>, StoreError> {
        let direction = query.sort.as_sql();
        let base = format!(
            "SELECT id, name, price, created_at FROM products ORDER BY created_at {direction}, id {direction}"
        );

        let rows = match query.window() {
            Some((offset, limit)) => {
                let sql = format!("{base} LIMIT $1 OFFSET $2");
                sqlx::query(&sql)
                    .bind(limit as i64)
                    .bind(offset as i64)
                    .fetch_all(&*self.pool)
                    .await
            }
            None => sqlx::query(&base).fetch_all(&*self.pool).await,
        }
        .map_err(|e| map_sqlx_error("list_products", e))?;

        rows.iter().map(product_from_row).collect()
    }
}

/// Postgres-backed user repository (`users` table, unique email).
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: Arc<PgPool>,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait::async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id_typed()), err)]
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(*user.id_typed().as_uuid())
        .bind(user.name())
        .bind(user.email())
        .bind(user.password_digest().as_str())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_user", e))?;
        Ok(())
    }

    #[instrument(skip(self, email), err)]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_user_by_email", e))?;

        row.as_ref().map(user_from_row).transpose()
    }
}
