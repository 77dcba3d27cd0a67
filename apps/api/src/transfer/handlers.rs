use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::handlers::commit;
use crate::transfer::{
    export_resumes, import_selected, parse_import, ExportFile, ImportOutcome, ImportPreview,
};

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportConfirmRequest {
    pub previews: Vec<ImportPreview>,
    pub selected: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct ImportConfirmResponse {
    pub imported: usize,
}

/// POST /api/v1/resumes/export
pub async fn handle_export(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportFile>, AppError> {
    let ws = state.workspace.read().await;
    Ok(Json(export_resumes(&ws, &req.ids)?))
}

/// POST /api/v1/resumes/import/preview
/// The request body is the raw file text. Parse failures are reported in the
/// outcome, never as an error status.
pub async fn handle_import_preview(
    State(state): State<AppState>,
    body: String,
) -> Json<ImportOutcome> {
    let existing: Vec<String> = {
        let ws = state.workspace.read().await;
        ws.list().iter().map(|r| r.name.clone()).collect()
    };
    Json(parse_import(&body, &existing))
}

/// POST /api/v1/resumes/import/confirm
pub async fn handle_import_confirm(
    State(state): State<AppState>,
    Json(req): Json<ImportConfirmRequest>,
) -> Result<Json<ImportConfirmResponse>, AppError> {
    let mut ws = state.workspace.write().await;
    let mut next = ws.clone();
    let imported = import_selected(&mut next, &req.previews, &req.selected);
    if imported > 0 {
        commit(&state, &mut ws, next).await?;
    }
    Ok(Json(ImportConfirmResponse { imported }))
}
