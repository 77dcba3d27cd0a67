use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeData, SectionKey};
use crate::state::AppState;
use crate::store::edits::ResumeEdit;
use crate::store::Workspace;
use crate::templates::handlers::{RenderOptions, RenderResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeSummary {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeSummary>,
    pub active_resume_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedSection {
    pub key: SectionKey,
    pub order: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveResumeResponse {
    pub resume: Option<Resume>,
    /// Active data, or defaults when nothing is active.
    pub data: Arc<ResumeData>,
    pub full_name: String,
    pub sections_with_data: Vec<SectionKey>,
    pub ordered_sections: Vec<OrderedSection>,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub changed: bool,
    pub resume: Option<Resume>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateResumeRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderQuery {
    pub template: Option<String>,
    pub font: Option<String>,
    pub font_size: Option<f32>,
}

fn list_response(ws: &Workspace) -> ResumeListResponse {
    let active = ws.active_resume_id();
    ResumeListResponse {
        resumes: ws
            .list()
            .iter()
            .map(|r| ResumeSummary {
                id: r.id.clone(),
                name: r.name.clone(),
                is_active: active == Some(r.id.as_str()),
                created_at: r.created_at,
                updated_at: r.updated_at,
            })
            .collect(),
        active_resume_id: active.map(str::to_string),
    }
}

/// Persists `next` and only then publishes it as the live workspace. A failed
/// save leaves `current` exactly as it was.
pub(crate) async fn commit(
    state: &AppState,
    current: &mut Workspace,
    next: Workspace,
) -> Result<(), AppError> {
    state.resumes.save(&next).await?;
    *current = next;
    Ok(())
}

fn found(ws: &Workspace, id: &str) -> Result<Resume, AppError> {
    ws.get(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(State(state): State<AppState>) -> Json<ResumeListResponse> {
    let ws = state.workspace.read().await;
    Json(list_response(&ws))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    body: Option<Json<CreateResumeRequest>>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let req = body.map(|Json(r)| r).unwrap_or_default();
    let mut ws = state.workspace.write().await;
    let mut next = ws.clone();
    let id = next.create(req.name.as_deref());
    commit(&state, &mut ws, next).await?;

    info!("Created resume {id}");
    Ok((StatusCode::CREATED, Json(found(&ws, &id)?)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let ws = state.workspace.read().await;
    Ok(Json(found(&ws, &id)?))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut ws = state.workspace.write().await;
    let mut next = ws.clone();
    if !next.delete(&id) {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    commit(&state, &mut ws, next).await?;

    info!("Deleted resume {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/resumes/:id/name
pub async fn handle_rename_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<Resume>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Resume name must not be empty".to_string()));
    }
    let mut ws = state.workspace.write().await;
    let mut next = ws.clone();
    if !next.rename(&id, name) {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    commit(&state, &mut ws, next).await?;
    Ok(Json(found(&ws, &id)?))
}

/// PUT /api/v1/resumes/:id/data
pub async fn handle_replace_data(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(data): Json<ResumeData>,
) -> Result<Json<Resume>, AppError> {
    let mut ws = state.workspace.write().await;
    let mut next = ws.clone();
    if !next.update_data(&id, data) {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    commit(&state, &mut ws, next).await?;
    Ok(Json(found(&ws, &id)?))
}

/// POST /api/v1/resumes/:id/reset
pub async fn handle_reset_data(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let mut ws = state.workspace.write().await;
    let mut next = ws.clone();
    if !next.reset_data(&id) {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    commit(&state, &mut ws, next).await?;
    Ok(Json(found(&ws, &id)?))
}

/// POST /api/v1/resumes/:id/activate
pub async fn handle_activate_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let mut ws = state.workspace.write().await;
    let mut next = ws.clone();
    if !next.set_active(&id) {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    commit(&state, &mut ws, next).await?;
    Ok(Json(list_response(&ws)))
}

/// POST /api/v1/resumes/:id/duplicate
pub async fn handle_duplicate_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let mut ws = state.workspace.write().await;
    let mut next = ws.clone();
    let copy = next
        .duplicate(&id)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    commit(&state, &mut ws, next).await?;

    info!("Duplicated resume {id} as {copy}");
    Ok((StatusCode::CREATED, Json(found(&ws, &copy)?)))
}

/// GET /api/v1/resumes/active
pub async fn handle_get_active(State(state): State<AppState>) -> Json<ActiveResumeResponse> {
    let ws = state.workspace.read().await;
    Json(ActiveResumeResponse {
        resume: ws.active().cloned(),
        data: ws.active_data(),
        full_name: ws.full_name(),
        sections_with_data: ws.sections_with_data(),
        ordered_sections: ws
            .ordered_sections()
            .into_iter()
            .map(|(key, order)| OrderedSection { key, order })
            .collect(),
    })
}

/// PATCH /api/v1/resumes/active
/// Only persists when the edit actually changed something.
pub async fn handle_edit_active(
    State(state): State<AppState>,
    Json(edit): Json<ResumeEdit>,
) -> Result<Json<EditResponse>, AppError> {
    let mut ws = state.workspace.write().await;
    if ws.active().is_none() {
        return Err(AppError::NotFound("No active resume".to_string()));
    }
    let mut next = ws.clone();
    let changed = next.apply_edit(edit);
    if changed {
        commit(&state, &mut ws, next).await?;
    }
    Ok(Json(EditResponse {
        changed,
        resume: ws.active().cloned(),
    }))
}

/// GET /api/v1/resumes/active/render
/// Takes a snapshot under the read lock and renders after releasing it.
pub async fn handle_render_active(
    State(state): State<AppState>,
    Query(query): Query<RenderQuery>,
) -> Result<Json<RenderResponse>, AppError> {
    let options = RenderOptions::resolve(
        &state.render_defaults,
        query.template.as_deref(),
        query.font.as_deref(),
        query.font_size,
    )?;
    let data = state.workspace.read().await.active_data();
    Ok(Json(options.render(&data)))
}
