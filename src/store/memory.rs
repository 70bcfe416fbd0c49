use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{EntityStore, StoreError};
use crate::resource::{Entity, EntityKey};

/// In-memory store: an ordered map plus a sequence for store-assigned keys.
///
/// Check-and-act sequences (save-after-lookup, delete-after-lookup) take
/// the write lock once, so a mutation observes the same snapshot as its
/// existence check.
pub struct MemoryStore<E: Entity> {
    records: RwLock<BTreeMap<E::Key, E>>,
    sequence: AtomicI64,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
        }
    }
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for MemoryStore<E> {
    async fn find_all(&self) -> Result<Vec<E>, StoreError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find_by_key(&self, key: &E::Key) -> Result<Option<E>, StoreError> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn save(&self, mut entity: E) -> Result<E, StoreError> {
        let mut records = self.records.write().await;

        let key = match entity.key() {
            Some(key) => key,
            None => {
                let next = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
                let key = E::Key::from_sequence(next).ok_or_else(|| {
                    StoreError::QueryError(format!("{} records must carry their key", E::KIND))
                })?;
                entity.set_key(key.clone());
                key
            }
        };

        records.insert(key, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, StoreError> {
        Ok(self.records.write().await.remove(key).is_some())
    }
}
