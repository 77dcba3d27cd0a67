use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::store::Workspace;

/// Durable home of the workspace. Loaded once at startup; handlers write the
/// whole workspace through after every successful mutation.
///
/// Carried in `AppState` as `Arc<dyn ResumeRepository>`.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn load(&self) -> Result<Workspace, AppError>;
    async fn save(&self, workspace: &Workspace) -> Result<(), AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PgResumeRepository
// ────────────────────────────────────────────────────────────────────────────

/// One row per resume; the full `Resume` document lives in `payload`.
pub struct PgResumeRepository {
    pool: PgPool,
}

impl PgResumeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ResumeRow {
    payload: serde_json::Value,
    is_active: bool,
}

#[async_trait]
impl ResumeRepository for PgResumeRepository {
    async fn load(&self) -> Result<Workspace, AppError> {
        let rows: Vec<ResumeRow> =
            sqlx::query_as("SELECT payload, is_active FROM resumes ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        let mut resumes = Vec::with_capacity(rows.len());
        let mut active = None;
        for row in rows {
            let resume: Resume = serde_json::from_value(row.payload)
                .map_err(|e| anyhow::anyhow!("Corrupt resume payload: {e}"))?;
            if row.is_active {
                active = Some(resume.id.clone());
            }
            resumes.push(resume);
        }

        info!("Loaded {} resume(s) from PostgreSQL", resumes.len());
        Ok(Workspace::from_parts(resumes, active))
    }

    async fn save(&self, workspace: &Workspace) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let ids: Vec<String> = workspace.list().iter().map(|r| r.id.clone()).collect();
        sqlx::query("DELETE FROM resumes WHERE NOT (id = ANY($1))")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;

        for resume in workspace.list() {
            let payload = serde_json::to_value(resume)
                .map_err(|e| anyhow::anyhow!("Failed to encode resume {}: {e}", resume.id))?;
            let is_active = workspace.active_resume_id() == Some(resume.id.as_str());
            sqlx::query(
                r#"
                INSERT INTO resumes (id, payload, is_active)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO UPDATE
                    SET payload = EXCLUDED.payload, is_active = EXCLUDED.is_active
                "#,
            )
            .bind(&resume.id)
            .bind(payload)
            .bind(is_active)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!("Saved {} resume(s)", ids.len());
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// InMemoryResumeRepository
// ────────────────────────────────────────────────────────────────────────────

/// Process-local repository, used when no database is configured and in tests.
#[derive(Default)]
pub struct InMemoryResumeRepository {
    stored: Mutex<Option<Workspace>>,
}

impl InMemoryResumeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last saved workspace, if any.
    pub fn snapshot(&self) -> Option<Workspace> {
        self.stored.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl ResumeRepository for InMemoryResumeRepository {
    async fn load(&self) -> Result<Workspace, AppError> {
        Ok(self.snapshot().unwrap_or_default())
    }

    async fn save(&self, workspace: &Workspace) -> Result<(), AppError> {
        let mut guard = self
            .stored
            .lock()
            .map_err(|_| anyhow::anyhow!("Resume repository lock poisoned"))?;
        *guard = Some(workspace.clone());
        Ok(())
    }
}
