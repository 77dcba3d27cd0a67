use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub settings: Value,
}

/// GET /api/v1/settings
pub async fn handle_get_settings(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<SettingsResponse>, AppError> {
    let settings = match &state.settings {
        Some(repo) => repo.get(&user.user_id).await?,
        None => None,
    };
    Ok(Json(SettingsResponse {
        settings: settings.unwrap_or_else(|| Value::Object(Default::default())),
    }))
}
