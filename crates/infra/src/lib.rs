//! Infrastructure layer: persistence ports and the application services built on them.

pub mod accounts;
pub mod catalog;
pub mod error;
pub mod repository;

pub use accounts::AccountService;
pub use catalog::CatalogService;
pub use error::ServiceError;
pub use repository::{
    InMemoryProductRepository, InMemoryUserRepository, ListQuery, PostgresProductRepository,
    PostgresUserRepository, ProductRepository, SortOrder, StoreError, UserRepository,
};
