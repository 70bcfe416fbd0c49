pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::resource::Entity;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors surfaced by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// Per-kind key-value persistence.
///
/// One instance per resource kind, handed to the resource handler by the
/// caller (constructor injection), so tests run against [`MemoryStore`]
/// while deployments run against [`PgStore`].
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    /// Every record of the kind, in snapshot key order.
    async fn find_all(&self) -> Result<Vec<E>, StoreError>;

    async fn find_by_key(&self, key: &E::Key) -> Result<Option<E>, StoreError>;

    /// Persist a record and return it as stored. A record carrying no key
    /// (store-assigned kinds) gets the next key from the store's sequence;
    /// a keyed record upserts in place.
    async fn save(&self, entity: E) -> Result<E, StoreError>;

    /// Remove the record under `key`; returns whether one existed.
    async fn delete(&self, key: &E::Key) -> Result<bool, StoreError>;
}
