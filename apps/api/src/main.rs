mod auth;
mod config;
mod db;
mod errors;
mod layout;
mod models;
mod render;
mod routes;
mod settings;
mod state;
mod store;
mod templates;
mod transfer;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::routes::build_router;
use crate::settings::{PgSettingsRepository, SettingsRepository};
use crate::state::AppState;
use crate::store::repository::{InMemoryResumeRepository, PgResumeRepository, ResumeRepository};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Storage: PostgreSQL when configured, otherwise process memory
    let pool = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            ensure_schema(&pool).await?;
            Some(pool)
        }
        None => {
            warn!("DATABASE_URL not set; resumes are kept in memory and settings are empty");
            None
        }
    };
    let resumes: Arc<dyn ResumeRepository> = match &pool {
        Some(pool) => Arc::new(PgResumeRepository::new(pool.clone())),
        None => Arc::new(InMemoryResumeRepository::new()),
    };
    let settings = pool
        .map(|pool| Arc::new(PgSettingsRepository::new(pool)) as Arc<dyn SettingsRepository>);

    // Load and normalize the workspace
    let mut workspace = resumes.load().await?;
    workspace.initialize();
    resumes.save(&workspace).await?;
    info!(
        "Workspace ready: {} resume(s), active {:?}",
        workspace.len(),
        workspace.active_resume_id()
    );

    info!(
        "Render defaults: {} {}pt",
        config.default_font, config.default_font_size
    );

    // Build app state
    let state = AppState::new(config, workspace, resumes, settings);
    let addr: SocketAddr = format!("0.0.0.0:{}", state.config.port).parse()?;

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        // TODO: restrict origins once the editor's deploy host is fixed
        .layer(CorsLayer::permissive());

    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
