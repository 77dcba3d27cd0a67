//! Resume export and two-step import (preview, then confirm a selection).

pub mod handlers;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::store::Workspace;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEntry<'a> {
    name: &'a str,
    data: &'a Arc<ResumeData>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ExportFile {
    pub filename: String,
    pub json: String,
}

/// One importable resume found in an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub name: String,
    pub data: ResumeData,
    #[serde(default)]
    pub is_duplicate: bool,
    #[serde(default)]
    pub item_count: usize,
}

/// Result of parsing an import file. A failure covers the whole file.
#[derive(Debug, Serialize)]
pub struct ImportOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previews: Option<Vec<ImportPreview>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImportOutcome {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            previews: None,
            error: Some(error.into()),
        }
    }
}

/// Lowercased name with each whitespace run collapsed to `-`.
fn slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

pub fn export_resumes(workspace: &Workspace, ids: &[String]) -> Result<ExportFile, AppError> {
    export_resumes_on(workspace, ids, Utc::now().date_naive())
}

/// Serializes the selected resumes (workspace order) as a pretty JSON array.
pub fn export_resumes_on(
    workspace: &Workspace,
    ids: &[String],
    date: NaiveDate,
) -> Result<ExportFile, AppError> {
    let entries: Vec<ExportEntry> = workspace
        .list()
        .iter()
        .filter(|r| ids.contains(&r.id))
        .map(|r| ExportEntry {
            name: &r.name,
            data: &r.data,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
        .collect();

    let date = date.format("%Y-%m-%d");
    let filename = match entries.as_slice() {
        [] => return Err(AppError::Validation("No resumes to export".to_string())),
        [only] => format!("resume-{}-{date}.json", slug(only.name)),
        _ => format!("resumes-export-{date}.json"),
    };

    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| anyhow::anyhow!("Failed to serialize export: {e}"))?;

    info!("Exported {} resume(s) as {filename}", entries.len());
    Ok(ExportFile { filename, json })
}

/// Parses an uploaded export file into previews.
///
/// Entries without a non-empty `name`, or whose `data` is not a resume
/// object, are skipped. `existing_names` drives the duplicate flag
/// (case-insensitive).
pub fn parse_import(text: &str, existing_names: &[String]) -> ImportOutcome {
    let parsed: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(e) => {
            warn!("Import file is not valid JSON: {e}");
            return ImportOutcome::failed(format!("Failed to parse import file: {e}"));
        }
    };
    let Value::Array(entries) = parsed else {
        return ImportOutcome::failed("Invalid file format. Expected an array of resumes.");
    };

    let existing: HashSet<String> = existing_names.iter().map(|n| n.to_lowercase()).collect();

    let previews: Vec<ImportPreview> = entries
        .into_iter()
        .filter_map(|mut entry| {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .filter(|n| !n.is_empty())?
                .to_string();
            let data = match entry.get_mut("data").map(Value::take) {
                Some(data @ Value::Object(_)) => serde_json::from_value::<ResumeData>(data).ok()?,
                _ => return None,
            };
            Some(ImportPreview {
                is_duplicate: existing.contains(&name.to_lowercase()),
                item_count: data.item_count(),
                name,
                data,
            })
        })
        .collect();

    ImportOutcome {
        success: true,
        previews: Some(previews),
        error: None,
    }
}

/// Creates one resume per selected preview. Unknown indexes are skipped.
pub fn import_selected(
    workspace: &mut Workspace,
    previews: &[ImportPreview],
    indexes: &[usize],
) -> usize {
    let mut imported = 0;
    for preview in indexes.iter().filter_map(|i| previews.get(*i)) {
        workspace.create_with_data(Some(&preview.name), preview.data.clone());
        imported += 1;
    }
    info!("Imported {imported} resume(s)");
    imported
}
