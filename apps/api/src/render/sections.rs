//! Section renderers: generator + formatter + titled wrapper, per section.
//!
//! Every renderer returns `""` when its data has nothing renderable, so
//! templates can call them unconditionally and drop blank results.

use crate::layout::config::{SectionSpacing, TemplateLayoutConfig, ITEMS_SPACING};
use crate::models::resume::{ResumeData, SectionKey};
use crate::render::formatters::{
    format_certificates_items, format_education_items, format_experience_items,
    format_projects_items, format_section_items, format_simple_items, format_social_links,
    wrap_in_section_block,
};
use crate::render::generators::{
    generate_certificates_content, generate_contact_content, generate_education_content,
    generate_experience_content, generate_internships_content, generate_languages_content,
    generate_legacy_skills_content, generate_projects_content, generate_skills_content,
    generate_social_links_content, generate_volunteering_content, SectionContent,
};
use crate::render::typst::escape_text;

pub type SectionRenderer = fn(&ResumeData, f32, &TemplateLayoutConfig) -> String;

fn wrap(data: &ResumeData, key: SectionKey, content: &str, font_size: f32) -> String {
    wrap_in_section_block(&data.section_header(key), content, font_size)
}

/// Skills and languages always stack as spaced blocks, whatever the template.
fn stacked(content: &[SectionContent]) -> String {
    let items: Vec<String> = content.iter().map(|c| c.content.clone()).collect();
    format_section_items(&items, &SectionSpacing::block(ITEMS_SPACING))
}

pub fn render_experience(
    data: &ResumeData,
    font_size: f32,
    config: &TemplateLayoutConfig,
) -> String {
    let content = generate_experience_content(&data.experiences);
    if content.is_empty() {
        return String::new();
    }
    let body = format_experience_items(&content, config, font_size);
    wrap(data, SectionKey::Experience, &body, font_size)
}

pub fn render_internships(
    data: &ResumeData,
    font_size: f32,
    config: &TemplateLayoutConfig,
) -> String {
    let content = generate_internships_content(&data.internships);
    if content.is_empty() {
        return String::new();
    }
    let body = format_experience_items(&content, config, font_size);
    wrap(data, SectionKey::Internships, &body, font_size)
}

pub fn render_education(
    data: &ResumeData,
    font_size: f32,
    config: &TemplateLayoutConfig,
) -> String {
    let content = generate_education_content(&data.education);
    if content.is_empty() {
        return String::new();
    }
    let body = format_education_items(&content, config, font_size);
    wrap(data, SectionKey::Education, &body, font_size)
}

pub fn render_volunteering(
    data: &ResumeData,
    font_size: f32,
    config: &TemplateLayoutConfig,
) -> String {
    let content = generate_volunteering_content(&data.volunteering);
    if content.is_empty() {
        return String::new();
    }
    let body = format_experience_items(&content, config, font_size);
    wrap(data, SectionKey::Volunteering, &body, font_size)
}

pub fn render_projects(data: &ResumeData, font_size: f32, config: &TemplateLayoutConfig) -> String {
    let content = generate_projects_content(&data.projects);
    if content.is_empty() {
        return String::new();
    }
    let body = format_projects_items(&content, config);
    wrap(data, SectionKey::Projects, &body, font_size)
}

/// Structured `skills` win; the legacy `technicalSkills` string is only used
/// while the structured list is empty.
pub fn render_skills(data: &ResumeData, font_size: f32, _config: &TemplateLayoutConfig) -> String {
    let content = if data.skills.is_empty() {
        generate_legacy_skills_content(&data.technical_skills)
    } else {
        generate_skills_content(&data.skills)
    };
    if content.is_empty() {
        return String::new();
    }
    wrap(data, SectionKey::Skills, &stacked(&content), font_size)
}

pub fn render_languages(
    data: &ResumeData,
    font_size: f32,
    _config: &TemplateLayoutConfig,
) -> String {
    let content = generate_languages_content(&data.languages);
    if content.is_empty() {
        return String::new();
    }
    wrap(data, SectionKey::Languages, &stacked(&content), font_size)
}

pub fn render_contact_info(
    data: &ResumeData,
    font_size: f32,
    config: &TemplateLayoutConfig,
) -> String {
    let content = generate_contact_content(data);
    if content.is_empty() {
        return String::new();
    }
    let body = format_simple_items(&content, config);
    wrap(data, SectionKey::ContactInfo, &body, font_size)
}

/// Inline header links come back as the bare joined fragment; every other
/// placement gets a titled block.
pub fn render_social_links(
    data: &ResumeData,
    font_size: f32,
    config: &TemplateLayoutConfig,
) -> String {
    let content = generate_social_links_content(data);
    if content.is_empty() {
        return String::new();
    }
    let body = format_social_links(&content, &config.social_links);

    if config.social_links.is_inline() {
        return body;
    }
    wrap(data, SectionKey::SocialLinks, &body, font_size)
}

pub fn render_profile(data: &ResumeData, font_size: f32, _config: &TemplateLayoutConfig) -> String {
    let summary = data.summary.trim();
    if summary.is_empty() {
        return String::new();
    }
    wrap(data, SectionKey::Summary, &escape_text(summary), font_size)
}

pub fn render_certificates(
    data: &ResumeData,
    font_size: f32,
    config: &TemplateLayoutConfig,
) -> String {
    let content = generate_certificates_content(&data.certificates);
    if content.is_empty() {
        return String::new();
    }
    let body = format_certificates_items(&content, config);
    wrap(data, SectionKey::Certificates, &body, font_size)
}

/// Renderer bound to each section key.
pub fn section_renderer(key: SectionKey) -> SectionRenderer {
    match key {
        SectionKey::Summary => render_profile,
        SectionKey::Experience => render_experience,
        SectionKey::Education => render_education,
        SectionKey::Skills => render_skills,
        SectionKey::Volunteering => render_volunteering,
        SectionKey::SocialLinks => render_social_links,
        SectionKey::Projects => render_projects,
        SectionKey::Languages => render_languages,
        SectionKey::Internships => render_internships,
        SectionKey::Certificates => render_certificates,
        SectionKey::ContactInfo => render_contact_info,
    }
}
