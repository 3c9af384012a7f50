//! Typed wrappers for compile-time ID type safety.
//!
//! This module provides `Id<T>`, a typed wrapper around the `i64` surrogate
//! key that prevents accidentally mixing up different ID types (e.g., passing
//! a `PersonId` where a `MemberId` was expected).
//!
//! Surrogate keys are server-assigned: the database generates them on insert,
//! so there is no in-process constructor for a fresh key. IDs only enter the
//! program from `RETURNING id` clauses, row decoding, or `from_raw` in tests.
//!
//! # Example
//!
//! ```rust
//! use crm_core::common::id::Id;
//!
//! // Define entity marker types
//! pub struct Member;
//! pub struct Person;
//!
//! // Create type aliases
//! pub type MemberId = Id<Member>;
//! pub type PersonId = Id<Person>;
//!
//! let member_id = MemberId::from_raw(42);
//!
//! // This would be a compile error:
//! // let wrong: PersonId = member_id;
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;

/// A typed wrapper around an `i64` surrogate key.
///
/// The type parameter `T` represents the entity type this ID belongs to.
/// IDs with different `T` parameters are incompatible at compile time.
#[repr(transparent)]
pub struct Id<T>(i64, PhantomData<fn() -> T>);

// ============================================================================
// Core implementations
// ============================================================================

impl<T> Id<T> {
    /// Creates an `Id` from a raw key.
    ///
    /// This is useful when loading IDs from the database or in test fixtures.
    #[inline]
    pub fn from_raw(key: i64) -> Self {
        Self(key, PhantomData)
    }

    /// Returns the inner key.
    #[inline]
    pub fn into_inner(self) -> i64 {
        self.0
    }

    /// Returns the inner key without consuming the ID.
    #[inline]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

// ============================================================================
// Standard trait implementations
// ============================================================================

impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Include type name for debugging clarity
        f.debug_tuple(&format!("Id<{}>", std::any::type_name::<T>()))
            .field(&self.0)
            .finish()
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for Id<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Id<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> From<i64> for Id<T> {
    #[inline]
    fn from(key: i64) -> Self {
        Self::from_raw(key)
    }
}

impl<T> From<Id<T>> for i64 {
    #[inline]
    fn from(id: Id<T>) -> Self {
        id.0
    }
}

impl<T> FromStr for Id<T> {
    type Err = std::num::ParseIntError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self::from_raw)
    }
}

// ============================================================================
// sqlx support
// ============================================================================

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgHasArrayType, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type};

impl<T> Type<Postgres> for Id<T> {
    fn type_info() -> PgTypeInfo {
        <i64 as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <i64 as Type<Postgres>>::compatible(ty)
    }
}

impl<T> PgHasArrayType for Id<T> {
    fn array_type_info() -> PgTypeInfo {
        <i64 as PgHasArrayType>::array_type_info()
    }
}

impl<T> Encode<'_, Postgres> for Id<T> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <i64 as Encode<Postgres>>::encode_by_ref(&self.0, buf)
    }
}

impl<T> Decode<'_, Postgres> for Id<T> {
    fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
        <i64 as Decode<Postgres>>::decode(value).map(Self::from_raw)
    }
}
