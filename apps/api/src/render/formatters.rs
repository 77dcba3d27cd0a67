//! Layout formatters: turn generated `SectionContent` into final markup
//! according to a template's spacing configuration.
//!
//! Parts of a single record (title, date line, achievements, extra info) are
//! always separated by a blank line; only the item-level join follows config.

use crate::layout::config::{
    LinkPlacement, Orientation, SectionSpacing, SocialLinksConfig, Spacing, TemplateLayoutConfig,
    ITEMS_SPACING, SECTION_SPACING,
};
use crate::render::generators::SectionContent;
use crate::render::typst::{
    convert_list, escape_text, render_template_date, render_template_date_with_link,
    render_template_header, render_template_sub_header, INLINE_SEPARATOR,
};

const PART_SEPARATOR: &str = "\n\n";

fn spaced_block(content: &str, below: &str) -> String {
    format!("#block(above: 0em, below: {below})[{content}]")
}

/// Joins already-formatted items per the spacing descriptor.
pub fn format_section_items(items: &[String], spacing: &SectionSpacing) -> String {
    if spacing.spacing == Spacing::Block && !spacing.item_spacing.is_empty() {
        return items
            .iter()
            .map(|item| spaced_block(item, &spacing.item_spacing))
            .collect();
    }
    items.join(&spacing.join_separator)
}

/// Item join shared by the experience-like and education-like formatters.
fn join_records(items: Vec<String>, config: &TemplateLayoutConfig) -> String {
    if config.is_two_column() {
        items.join(PART_SEPARATOR)
    } else {
        items.join(&config.sections.join_separator)
    }
}

fn non_empty_contents(content: &[SectionContent]) -> Vec<String> {
    content
        .iter()
        .map(|item| item.content.clone())
        .filter(|c| !c.is_empty())
        .collect()
}

pub fn format_social_links(content: &[SectionContent], config: &SocialLinksConfig) -> String {
    let links = non_empty_contents(content);

    if config.orientation == Orientation::Horizontal {
        return links.join(&config.separator);
    }

    let item_spacing = match config.placement {
        LinkPlacement::Sidebar => ITEMS_SPACING,
        LinkPlacement::Header => "",
    };
    format_section_items(&links, &SectionSpacing::block(item_spacing))
}

/// Experience, internships, volunteering: title, date + link, achievements.
pub fn format_experience_items(
    content: &[SectionContent],
    config: &TemplateLayoutConfig,
    font_size: f32,
) -> String {
    let items = content
        .iter()
        .map(|item| {
            let mut parts = vec![render_template_sub_header(&item.title, font_size)];

            if !item.date.is_empty() || !item.content.is_empty() {
                let link = (!item.content.is_empty()).then_some(item.content.as_str());
                parts.push(render_template_date_with_link(&item.date, link, font_size));
            }
            if !item.achievements.is_empty() {
                parts.push(convert_list(&item.achievements));
            }

            parts.join(PART_SEPARATOR)
        })
        .collect();

    join_records(items, config)
}

/// Education: title, date, grade and description.
pub fn format_education_items(
    content: &[SectionContent],
    config: &TemplateLayoutConfig,
    font_size: f32,
) -> String {
    let items = content
        .iter()
        .map(|item| {
            let mut parts = vec![render_template_sub_header(&item.title, font_size)];

            if !item.date.is_empty() {
                parts.push(render_template_date(&item.date, font_size));
            }
            if let Some(info) = &item.additional_info {
                parts.push(info.clone());
            }

            parts.join(PART_SEPARATOR)
        })
        .collect();

    join_records(items, config)
}

/// Projects: bold title with an inline link icon, then the description.
pub fn format_projects_items(content: &[SectionContent], config: &TemplateLayoutConfig) -> String {
    let items: Vec<String> = content
        .iter()
        .map(|item| {
            let mut parts = Vec::new();

            if !item.title.is_empty() {
                let mut heading = format!("#text(weight: \"bold\")[{}]", escape_text(&item.title));
                if !item.content.is_empty() {
                    heading.push_str(INLINE_SEPARATOR);
                    heading.push_str(&item.content);
                }
                parts.push(format!("#block(below: 0.6em)[{heading}]"));
            }
            if let Some(description) = &item.additional_info {
                parts.push(description.clone());
            }

            parts.join(PART_SEPARATOR)
        })
        .filter(|c| !c.trim().is_empty())
        .collect();

    if config.sections.spacing == Spacing::Block && !config.projects_item_spacing.is_empty() {
        return items
            .iter()
            .map(|item| spaced_block(item, &config.projects_item_spacing))
            .collect();
    }
    items.join(&config.sections.join_separator)
}

/// Certificates: `title date` on one line, link on the next, description after.
pub fn format_certificates_items(
    content: &[SectionContent],
    config: &TemplateLayoutConfig,
) -> String {
    let items: Vec<String> = content
        .iter()
        .map(|item| {
            let mut line = String::new();

            if !item.title.is_empty() {
                line.push_str(&format!("*{}*", escape_text(&item.title)));
            }
            if !item.date.is_empty() {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&escape_text(&item.date));
            }
            if !item.content.is_empty() {
                if !line.is_empty() {
                    line.push('\n');
                }
                line.push_str(&item.content);
            }
            if let Some(description) = &item.additional_info {
                if !line.is_empty() {
                    line.push_str(PART_SEPARATOR);
                }
                line.push_str(description);
            }
            line
        })
        .filter(|c| !c.trim().is_empty())
        .collect();

    format_section_items(&items, &config.sections)
}

/// Skills, languages, contact details: content-only items.
pub fn format_simple_items(content: &[SectionContent], config: &TemplateLayoutConfig) -> String {
    format_section_items(&non_empty_contents(content), &config.sections)
}

/// Titled section block. Blank content yields an empty string so templates
/// can concatenate renderer output unconditionally.
pub fn wrap_in_section_block(header: &str, content: &str, font_size: f32) -> String {
    if content.trim().is_empty() {
        return String::new();
    }
    format!(
        "#block(above: 0em, below: {SECTION_SPACING})[\n{}\n\n{}\n]",
        render_template_header(header, font_size),
        content
    )
}
