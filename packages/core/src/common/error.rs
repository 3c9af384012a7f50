//! Repository error taxonomy.
//!
//! Write failures fall into three buckets callers treat differently:
//! constraint violations (the data is bad, fix it), version conflicts
//! (the read was stale, reload and retry), and everything else (database
//! or connection trouble). Not-found on reads is not an error; lookups
//! return `None`.

use thiserror::Error;

// PostgreSQL SQLSTATE codes that indicate the write itself was rejected
// by a column or table constraint rather than infrastructure failure.
const NOT_NULL_VIOLATION: &str = "23502";
const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

/// Errors surfaced by repository operations.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// A unique, not-null, length, or check constraint rejected the write.
    /// Nothing was committed.
    #[error("constraint violation ({constraint}): {message}")]
    ConstraintViolation {
        /// Name of the violated constraint, when the database reports one.
        constraint: String,
        /// Database error message.
        message: String,
    },

    /// The entity was updated by someone else since it was read. The caller
    /// can reload and retry with fresh data.
    #[error("stale version {version} for {entity} with id {id}")]
    VersionConflict {
        entity: &'static str,
        id: i64,
        version: i32,
    },

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Classifies a sqlx error, mapping constraint SQLSTATEs to
    /// `ConstraintViolation` and passing everything else through.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let is_constraint = matches!(
                db_err.code().as_deref(),
                Some(
                    NOT_NULL_VIOLATION
                        | UNIQUE_VIOLATION
                        | CHECK_VIOLATION
                        | STRING_DATA_RIGHT_TRUNCATION
                )
            );
            if is_constraint {
                return Self::ConstraintViolation {
                    constraint: db_err.constraint().unwrap_or("unspecified").to_string(),
                    message: db_err.message().to_string(),
                };
            }
        }
        Self::Database(err)
    }

    /// True if this is a constraint violation.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }

    /// True if this is an optimistic-lock conflict.
    pub fn is_version_conflict(&self) -> bool {
        matches!(self, Self::VersionConflict { .. })
    }
}
