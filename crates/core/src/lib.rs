//! `catalog-core` - domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the entity trait, and the closed domain error taxonomy.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, UserId, new_id};
