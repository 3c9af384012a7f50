//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.

// Re-export the core Id type
pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Person entities.
pub struct Person;

/// Marker type for Member entities.
pub struct Member;

// ============================================================================
// Type aliases
// ============================================================================

/// Typed ID for Person entities.
pub type PersonId = Id<Person>;

/// Typed ID for Member entities.
pub type MemberId = Id<Member>;
