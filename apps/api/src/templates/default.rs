//! Default template: two columns (7fr / 3fr).
//!
//! The left column holds the name header, the profile and the pinned history
//! sections; contact details and links open the right column. Movable
//! sections go wherever `sectionPlacement` puts them (right when unset).

use crate::layout::config::{default_layout_config, TemplateLayoutConfig, SECTION_SPACING};
use crate::models::resume::{Placement, ResumeData, SectionKey};
use crate::render::typst::{convert_grid, escape_text, render_template_header};
use crate::templates::{
    compose_document, full_name, render_keys, sort_by_section_order, ResumeTemplate,
};

const PINNED_LEFT: [SectionKey; 3] = [
    SectionKey::Experience,
    SectionKey::Internships,
    SectionKey::Education,
];
const PINNED_RIGHT: [SectionKey; 2] = [SectionKey::ContactInfo, SectionKey::SocialLinks];

pub struct DefaultTemplate;

/// Section keys per column, each already in render order.
#[derive(Debug, PartialEq)]
pub struct ColumnSplit {
    pub left: Vec<SectionKey>,
    pub right: Vec<SectionKey>,
}

pub fn split_columns(data: &ResumeData, config: &TemplateLayoutConfig) -> ColumnSplit {
    let mut left = PINNED_LEFT.to_vec();
    let mut movable_right = Vec::new();

    for key in &config.columns.movable_sections {
        match data.placement(*key) {
            Placement::Left => left.push(*key),
            Placement::Right => movable_right.push(*key),
        }
    }

    sort_by_section_order(&mut left, data);
    sort_by_section_order(&mut movable_right, data);

    let mut right = PINNED_RIGHT.to_vec();
    right.extend(movable_right);
    ColumnSplit { left, right }
}

/// `= Name`, then the position line and the titled profile when present.
fn render_header(data: &ResumeData, font_size: f32) -> String {
    let mut header = format!("= {}\n\n", full_name(data));

    let position = data.position.trim();
    if !position.is_empty() {
        header.push_str(&format!(
            "#block(above: 0em, below: {SECTION_SPACING})[{}]",
            escape_text(position)
        ));
    }

    let summary = data.summary.trim();
    if !summary.is_empty() {
        header.push_str(&format!(
            "\n\n{}\n\n#block(above: 0em, below: {SECTION_SPACING})[{}]",
            render_template_header(&data.section_header(SectionKey::Summary), font_size),
            escape_text(summary)
        ));
    }
    header
}

impl DefaultTemplate {
    /// Left and right column bodies, before they are placed in the grid.
    pub fn render_columns(&self, data: &ResumeData, font_size: f32) -> (String, String) {
        let config = self.layout_config();
        let split = split_columns(data, &config);

        let left = render_keys(&split.left, data, font_size, &config).concat();
        let right = render_keys(&split.right, data, font_size, &config).concat();

        (format!("{}\n\n{left}", render_header(data, font_size)), right)
    }
}

impl ResumeTemplate for DefaultTemplate {
    fn id(&self) -> &'static str {
        "default"
    }

    fn name(&self) -> &'static str {
        "Default"
    }

    fn description(&self) -> &'static str {
        "Two-column layout with contact details and links in a sidebar"
    }

    fn layout_config(&self) -> TemplateLayoutConfig {
        default_layout_config()
    }

    fn parse(&self, data: &ResumeData, font: &str, font_size: f32) -> String {
        let config = self.layout_config();
        let (left, right) = self.render_columns(data, font_size);
        let grid = convert_grid(&[left, right], &config.columns.grid_spec());
        compose_document(&config, font, font_size, &grid)
    }
}
