//! Identity and versioning contract shared by all persisted entities.

/// Trait implemented by every persisted domain entity.
///
/// An entity carries a server-assigned surrogate key (`None` while the
/// instance is transient, populated on first save) and a version counter
/// used for optimistic locking. The persistence layer increments the
/// version by exactly one on every successful update; a writer holding a
/// stale version observes a conflict instead of silently overwriting.
pub trait Entity: Sized + Send {
    /// The surrogate key type of this entity.
    type Key: Copy + Send + Sync + 'static;

    /// The surrogate key, or `None` if the entity has not been saved yet.
    fn id(&self) -> Option<Self::Key>;

    /// Sets the surrogate key. Called by the persistence layer on insert.
    fn set_id(&mut self, key: Self::Key);

    /// The optimistic-lock version counter. Starts at 0 on insert.
    fn version(&self) -> i32;
}
