// Common types and utilities shared across the application

pub mod entity;
pub mod entity_ids;
pub mod error;
pub mod id;
pub mod repository;

pub use entity::Entity;
pub use entity_ids::*;
pub use error::RepositoryError;
pub use id::Id;
pub use repository::Repository;
