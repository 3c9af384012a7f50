//! Generic repository contract over persisted entities.

use async_trait::async_trait;

use super::entity::Entity;
use super::error::RepositoryError;

/// Standard persistence operations over an entity keyed by its surrogate ID.
///
/// `save` is insert-or-update: a transient entity (no id) is inserted and
/// returned with its id populated and version initialized; a persistent
/// entity is updated with an optimistic-lock check and returned with its
/// version refreshed. A stale version fails with
/// [`RepositoryError::VersionConflict`] rather than silently overwriting.
///
/// Each operation executes within a single transaction.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Insert or update the entity, returning it with id and version
    /// populated/refreshed.
    async fn save(&self, entity: E) -> Result<E, RepositoryError>;

    /// Look up an entity by id. Returns `None` if no row exists.
    async fn find_by_id(&self, id: E::Key) -> Result<Option<E>, RepositoryError>;

    /// Fetch all entities, ordered by id.
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError>;

    /// Delete the entity with the given id, cascading to owned entities.
    /// Returns `false` if no row existed.
    async fn delete(&self, id: E::Key) -> Result<bool, RepositoryError>;
}
