//! Templates: complete documents composed from the shared section renderers.
//!
//! A template is thin configuration: which sections it shows, how they are
//! split across columns, and the page setup. All section markup comes from
//! `render::sections`, so the two templates cannot drift apart.

pub mod compact;
pub mod default;
pub mod handlers;

use serde::Serialize;

use crate::layout::config::TemplateLayoutConfig;
use crate::models::resume::{ResumeData, SectionKey};
use crate::render::sections::section_renderer;
use crate::render::typst::{escape_string, escape_text};

pub use compact::CompactTemplate;
pub use default::DefaultTemplate;

/// Rank for sections missing from `sectionOrder`; they sort last.
pub const UNORDERED_RANK: i32 = 999;

/// A selectable document layout.
///
/// `parse` must be a pure function of its arguments: identical inputs yield
/// byte-identical markup.
pub trait ResumeTemplate: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn layout_config(&self) -> TemplateLayoutConfig;
    fn parse(&self, data: &ResumeData, font: &str, font_size: f32) -> String;
}

/// Serializable template descriptor for the templates listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub layout_config: TemplateLayoutConfig,
}

impl TemplateInfo {
    pub fn of(template: &dyn ResumeTemplate) -> Self {
        Self {
            id: template.id(),
            name: template.name(),
            description: template.description(),
            layout_config: template.layout_config(),
        }
    }
}

static DEFAULT_TEMPLATE: DefaultTemplate = DefaultTemplate;
static COMPACT_TEMPLATE: CompactTemplate = CompactTemplate;

pub fn available_templates() -> [&'static dyn ResumeTemplate; 2] {
    [&DEFAULT_TEMPLATE, &COMPACT_TEMPLATE]
}

pub fn find_template(id: &str) -> Option<&'static dyn ResumeTemplate> {
    available_templates().into_iter().find(|t| t.id() == id)
}

/// Looks up a template by id, falling back to the default template.
pub fn template_or_default(id: Option<&str>) -> &'static dyn ResumeTemplate {
    id.and_then(find_template).unwrap_or(&DEFAULT_TEMPLATE)
}

// ────────────────────────────────────────────────────────────────────────────
// Shared composition helpers
// ────────────────────────────────────────────────────────────────────────────

/// Stable ascending sort by `sectionOrder` rank; ties keep their given order.
pub(crate) fn sort_by_section_order(keys: &mut [SectionKey], data: &ResumeData) {
    keys.sort_by_key(|key| data.rank(*key).unwrap_or(UNORDERED_RANK));
}

/// Renders the keys in order, dropping sections with nothing to show.
pub(crate) fn render_keys(
    keys: &[SectionKey],
    data: &ResumeData,
    font_size: f32,
    config: &TemplateLayoutConfig,
) -> Vec<String> {
    keys.iter()
        .map(|key| section_renderer(*key)(data, font_size, config))
        .filter(|content| !content.trim().is_empty())
        .collect()
}

/// Escaped "First Last", trimmed.
pub(crate) fn full_name(data: &ResumeData) -> String {
    format!(
        "{} {}",
        escape_text(data.first_name.trim()),
        escape_text(data.last_name.trim())
    )
    .trim()
    .to_string()
}

/// Page `#set` rules, then the body, then a weak page break.
pub(crate) fn compose_document(
    config: &TemplateLayoutConfig,
    font: &str,
    font_size: f32,
    body: &str,
) -> String {
    let mut preamble = format!(
        "#set page(margin: {})\n#set text(font: (\"{}\"), size: {}pt)",
        config.page.margin,
        escape_string(font),
        font_size
    );
    if let Some(leading) = &config.page.leading {
        preamble.push_str(&format!("\n#set par(leading: {leading})"));
    }
    format!("{preamble}\n\n{body}\n\n#pagebreak(weak: true)")
}
