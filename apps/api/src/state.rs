use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::JwtVerifier;
use crate::config::Config;
use crate::models::settings::AppSettings;
use crate::settings::SettingsRepository;
use crate::store::repository::ResumeRepository;
use crate::store::Workspace;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Single writer at a time; readers clone `Arc<ResumeData>` snapshots and
    /// render outside the lock.
    pub workspace: Arc<RwLock<Workspace>>,
    /// Write-through persistence for `workspace`.
    pub resumes: Arc<dyn ResumeRepository>,
    /// `None` when no database is configured.
    pub settings: Option<Arc<dyn SettingsRepository>>,
    pub jwt: JwtVerifier,
    /// Font and size used when a render request leaves them out.
    pub render_defaults: AppSettings,
}

impl AppState {
    pub fn new(
        config: Config,
        workspace: Workspace,
        resumes: Arc<dyn ResumeRepository>,
        settings: Option<Arc<dyn SettingsRepository>>,
    ) -> Self {
        let jwt = JwtVerifier::new(&config.jwt_secret);
        let render_defaults = AppSettings {
            selected_font: config.default_font.clone(),
            font_size: config.default_font_size,
            ..Default::default()
        };
        Self {
            config,
            workspace: Arc::new(RwLock::new(workspace)),
            resumes,
            settings,
            jwt,
            render_defaults,
        }
    }
}
