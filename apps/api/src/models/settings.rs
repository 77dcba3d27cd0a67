use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT: &str = "Calibri";
pub const DEFAULT_FONT_SIZE: f32 = 14.0;
pub const DEFAULT_TEMPLATE: &str = "default";

/// Font families offered by the editor. Any other family name is still
/// passed through to the compiler unchanged.
pub const AVAILABLE_FONTS: &[&str] = &["Calibri", "Geist", "Roboto"];

/// Per-user editor preferences, synced through the settings service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub selected_font: String,
    pub selected_template: String,
    pub is_raw_mode: bool,
    pub font_size: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            selected_font: DEFAULT_FONT.to_string(),
            selected_template: DEFAULT_TEMPLATE.to_string(),
            is_raw_mode: false,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}
