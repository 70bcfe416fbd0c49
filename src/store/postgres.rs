use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool, Row};

use super::{EntityStore, StoreError};
use crate::config;
use crate::resource::{Entity, EntityKey};

/// PostgreSQL-backed store.
///
/// Records live in a single JSONB table keyed by (kind, key); numeric keys
/// come from a shared sequence. Each statement is atomic, which is the only
/// transactional guarantee the access contract relies on.
pub struct PgStore<E: Entity> {
    pool: PgPool,
    _marker: PhantomData<fn() -> E>,
}

impl<E: Entity> PgStore<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

/// Connect a pool against DATABASE_URL using the configured limits
pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    let db = &config::config().database;

    PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(Duration::from_secs(db.connection_timeout))
        .connect(database_url)
        .await
        .map_err(|e| StoreError::ConnectionError(e.to_string()))
}

/// Create the record table and key sequence if missing
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS entity_records (
            kind TEXT NOT NULL,
            key TEXT NOT NULL,
            record JSONB NOT NULL,
            PRIMARY KEY (kind, key)
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE SEQUENCE IF NOT EXISTS entity_record_keys")
        .execute(pool)
        .await?;

    Ok(())
}

/// Pings the pool to ensure connectivity
pub async fn health_check(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[async_trait]
impl<E: Entity> EntityStore<E> for PgStore<E> {
    async fn find_all(&self) -> Result<Vec<E>, StoreError> {
        let rows = sqlx::query("SELECT record FROM entity_records WHERE kind = $1 ORDER BY key")
            .bind(E::KIND)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                let value: serde_json::Value = row.try_get("record")?;
                Ok(serde_json::from_value(value)?)
            })
            .collect()
    }

    async fn find_by_key(&self, key: &E::Key) -> Result<Option<E>, StoreError> {
        let row = sqlx::query("SELECT record FROM entity_records WHERE kind = $1 AND key = $2")
            .bind(E::KIND)
            .bind(key.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let value: serde_json::Value = row.try_get("record")?;
                Ok(Some(serde_json::from_value(value)?))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, mut entity: E) -> Result<E, StoreError> {
        let key = match entity.key() {
            Some(key) => key,
            None => {
                let row = sqlx::query("SELECT nextval('entity_record_keys') AS next_key")
                    .fetch_one(&self.pool)
                    .await?;
                let next: i64 = row.try_get("next_key")?;
                let key = E::Key::from_sequence(next).ok_or_else(|| {
                    StoreError::QueryError(format!("{} records must carry their key", E::KIND))
                })?;
                entity.set_key(key.clone());
                key
            }
        };

        sqlx::query(
            "INSERT INTO entity_records (kind, key, record) VALUES ($1, $2, $3)
             ON CONFLICT (kind, key) DO UPDATE SET record = EXCLUDED.record",
        )
        .bind(E::KIND)
        .bind(key.to_string())
        .bind(serde_json::to_value(&entity)?)
        .execute(&self.pool)
        .await?;

        Ok(entity)
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM entity_records WHERE kind = $1 AND key = $2")
            .bind(E::KIND)
            .bind(key.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
