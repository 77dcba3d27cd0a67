use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::models::settings::{AppSettings, AVAILABLE_FONTS};
use crate::state::AppState;
use crate::templates::{available_templates, template_or_default, ResumeTemplate, TemplateInfo};

#[derive(Serialize)]
pub struct TemplateListResponse {
    pub templates: Vec<TemplateInfo>,
    pub fonts: &'static [&'static str],
    pub defaults: AppSettings,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub data: ResumeData,
    pub template_id: Option<String>,
    pub font: Option<String>,
    pub font_size: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub template_id: &'static str,
    pub markup: String,
}

/// Template, font and size for a render, with request values overriding the
/// configured defaults. Unknown template ids fall back to the default template.
pub struct RenderOptions {
    pub template: &'static dyn ResumeTemplate,
    pub font: String,
    pub font_size: f32,
}

impl RenderOptions {
    pub fn resolve(
        defaults: &AppSettings,
        template_id: Option<&str>,
        font: Option<&str>,
        font_size: Option<f32>,
    ) -> Result<Self, AppError> {
        let font_size = font_size.unwrap_or(defaults.font_size);
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(AppError::Validation(format!(
                "fontSize must be a positive number, got {font_size}"
            )));
        }
        let font = font
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(defaults.selected_font.as_str())
            .to_string();

        Ok(Self {
            template: template_or_default(template_id),
            font,
            font_size,
        })
    }

    pub fn render(&self, data: &ResumeData) -> RenderResponse {
        RenderResponse {
            template_id: self.template.id(),
            markup: self.template.parse(data, &self.font, self.font_size),
        }
    }
}

/// GET /api/v1/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: available_templates()
            .into_iter()
            .map(TemplateInfo::of)
            .collect(),
        fonts: AVAILABLE_FONTS,
        defaults: state.render_defaults.clone(),
    })
}

/// POST /api/v1/render
/// Stateless: renders the posted data without touching the workspace.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, AppError> {
    let options = RenderOptions::resolve(
        &state.render_defaults,
        req.template_id.as_deref(),
        req.font.as_deref(),
        req.font_size,
    )?;
    Ok(Json(options.render(&req.data)))
}
