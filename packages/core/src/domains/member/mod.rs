//! Member domain - membership records and the person each one owns.
//!
//! A `Member` exclusively owns one `Person`; saving or deleting a member
//! cascades to its person. `PgMemberRepository` persists both through
//! PostgreSQL with optimistic locking on the version columns.

pub mod models;
pub mod repository;

// Re-export commonly used types
pub use models::member::Member;
pub use models::person::{Gender, Person};
pub use repository::PgMemberRepository;
