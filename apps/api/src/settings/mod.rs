//! Per-user settings blobs, read behind token authentication.

pub mod handlers;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::errors::AppError;

/// Carried in `AppState` as `Option<Arc<dyn SettingsRepository>>`; `None`
/// when no database is configured.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// The user's stored settings object, if a row exists.
    async fn get(&self, user_id: &str) -> Result<Option<Value>, AppError>;
}

/// Stored values are normally JSON objects, but older rows hold the object
/// serialized as a JSON string.
fn normalize(stored: Value) -> Result<Value, AppError> {
    match stored {
        Value::String(raw) => serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Stored settings are not valid JSON: {e}").into()),
        other => Ok(other),
    }
}

pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn get(&self, user_id: &str) -> Result<Option<Value>, AppError> {
        let stored: Option<Value> =
            sqlx::query_scalar("SELECT settings FROM user_settings WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        stored.map(normalize).transpose()
    }
}

#[cfg(test)]
pub use in_memory::InMemorySettingsRepository;
