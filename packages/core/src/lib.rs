// CRM Core - membership persistence slice
//
// This crate provides the Person/Member entity model and the repository
// layer that persists both through PostgreSQL. Entities share a versioned
// identity contract (see common::Entity) and writes are guarded by
// optimistic locking on the version column.

pub mod common;
pub mod config;
pub mod db;
pub mod domains;

pub use config::*;
