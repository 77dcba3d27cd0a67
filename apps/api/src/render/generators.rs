//! Content generators: layout-agnostic transforms from resume records into
//! `SectionContent`.
//!
//! `title`, `date` and `achievements` carry plain text; formatters escape them.
//! `content` and `additional_info` carry ready-made markup fragments (links,
//! escaped prose). Records whose meaningful fields are all blank are dropped.

use serde::Serialize;

use crate::models::resume::{
    Achievement, Certificate, Education, Experience, Internship, Language, Project, ResumeData,
    SkillItem, SocialLink, Volunteering,
};
use crate::render::typst::{
    convert_date_range, convert_email, convert_external_link_icon, convert_link, escape_text,
};

/// Display names for known social platforms. Unknown keys render as-is.
pub const SOCIAL_PLATFORM_LABELS: [(&str, &str); 8] = [
    ("linkedin", "LinkedIn"),
    ("github", "GitHub"),
    ("twitter", "Twitter"),
    ("portfolio", "Portfolio"),
    ("dribbble", "Dribbble"),
    ("medium", "Medium"),
    ("devto", "Dev.to"),
    ("personal", "Personal"),
];

/// One renderable record, independent of visual layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionContent {
    pub title: String,
    pub date: String,
    pub content: String,
    pub achievements: Vec<String>,
    pub additional_info: Option<String>,
}

impl SectionContent {
    fn with_content(content: String) -> Self {
        Self {
            content,
            ..Default::default()
        }
    }
}

fn present(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// `"{primary} {connector} {secondary}, {location}"`, dropping each clause
/// together with its connector when the field is blank.
pub fn compose_title(primary: &str, connector: &str, secondary: &str, location: &str) -> String {
    let head = match (present(primary), present(secondary)) {
        (Some(p), Some(s)) => format!("{p} {connector} {s}"),
        (Some(p), None) => p.to_string(),
        (None, Some(s)) => s.to_string(),
        (None, None) => String::new(),
    };
    match (head.is_empty(), present(location)) {
        (false, Some(loc)) => format!("{head}, {loc}"),
        (true, Some(loc)) => loc.to_string(),
        (_, None) => head,
    }
}

fn achievement_texts(achievements: &[Achievement]) -> Vec<String> {
    achievements
        .iter()
        .filter_map(|a| present(&a.text))
        .map(str::to_string)
        .collect()
}

/// Label for a social link: the custom label for `other`, the platform table
/// otherwise, and the raw platform key as a last resort.
pub fn social_link_label(link: &SocialLink) -> String {
    if link.platform == "other" {
        if let Some(label) = present(&link.custom_label) {
            return label.to_string();
        }
    }
    SOCIAL_PLATFORM_LABELS
        .iter()
        .find(|(key, _)| *key == link.platform)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| link.platform.clone())
}

// ────────────────────────────────────────────────────────────────────────────
// Dated, achievement-bearing records
// ────────────────────────────────────────────────────────────────────────────

pub fn generate_experience_content(experiences: &[Experience]) -> Vec<SectionContent> {
    experiences
        .iter()
        .filter(|e| !e.is_blank())
        .map(|e| SectionContent {
            title: compose_title(&e.position, "at", &e.company, &e.location),
            date: convert_date_range(&e.start_date, &e.end_date, e.is_present),
            content: convert_external_link_icon(&e.company_url),
            achievements: achievement_texts(&e.achievements),
            additional_info: None,
        })
        .collect()
}

pub fn generate_internships_content(internships: &[Internship]) -> Vec<SectionContent> {
    generate_experience_content(internships)
}

pub fn generate_volunteering_content(volunteering: &[Volunteering]) -> Vec<SectionContent> {
    volunteering
        .iter()
        .filter(|v| !v.is_blank())
        .map(|v| SectionContent {
            title: compose_title(&v.position, "at", &v.organization, &v.location),
            date: convert_date_range(&v.start_date, &v.end_date, v.is_present),
            content: String::new(),
            achievements: achievement_texts(&v.achievements),
            additional_info: None,
        })
        .collect()
}

pub fn generate_education_content(education: &[Education]) -> Vec<SectionContent> {
    education
        .iter()
        .filter(|e| !e.is_blank())
        .map(|e| {
            let mut parts = Vec::new();
            if let Some(score) = present(&e.graduation_score) {
                parts.push(format!("*Grade:* {}", escape_text(score)));
            }
            if let Some(description) = present(&e.description) {
                parts.push(escape_text(description));
            }

            SectionContent {
                title: compose_title(&e.degree, "at", &e.institution, &e.location),
                date: convert_date_range(&e.start_date, &e.end_date, e.is_present),
                content: String::new(),
                achievements: Vec::new(),
                additional_info: (!parts.is_empty()).then(|| parts.join("\n\n")),
            }
        })
        .collect()
}

pub fn generate_certificates_content(certificates: &[Certificate]) -> Vec<SectionContent> {
    certificates
        .iter()
        .filter(|c| !c.is_blank())
        .map(|c| SectionContent {
            title: compose_title(&c.title, "from", &c.issuer, ""),
            date: convert_date_range(&c.date, "", false),
            content: convert_external_link_icon(&c.url),
            achievements: Vec::new(),
            additional_info: present(&c.description).map(escape_text),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Short-form records
// ────────────────────────────────────────────────────────────────────────────

/// Projects: plain title, link icon as `content`, escaped description as
/// `additional_info`. A URL alone does not make a project renderable.
pub fn generate_projects_content(projects: &[Project]) -> Vec<SectionContent> {
    projects
        .iter()
        .filter(|p| present(&p.title).is_some() || present(&p.description).is_some())
        .map(|p| SectionContent {
            title: p.title.trim().to_string(),
            date: String::new(),
            content: convert_external_link_icon(&p.url),
            achievements: Vec::new(),
            additional_info: present(&p.description).map(escape_text),
        })
        .collect()
}

pub fn generate_skills_content(skills: &[SkillItem]) -> Vec<SectionContent> {
    skills
        .iter()
        .filter_map(|skill| {
            let content = match (present(&skill.title), present(&skill.description)) {
                (Some(t), Some(d)) => format!("*{}:* {}", escape_text(t), escape_text(d)),
                (Some(t), None) => format!("*{}*", escape_text(t)),
                (None, Some(d)) => escape_text(d),
                (None, None) => return None,
            };
            Some(SectionContent::with_content(content))
        })
        .collect()
}

/// Legacy freeform `technicalSkills` string as a single item.
pub fn generate_legacy_skills_content(technical_skills: &str) -> Vec<SectionContent> {
    present(technical_skills)
        .map(|text| vec![SectionContent::with_content(escape_text(text))])
        .unwrap_or_default()
}

pub fn generate_languages_content(languages: &[Language]) -> Vec<SectionContent> {
    languages
        .iter()
        .filter_map(|language| {
            let name = present(&language.name)?;
            let mut content = format!("*{}*", escape_text(name));
            if let Some(proficiency) = present(&language.proficiency) {
                content.push_str(&format!(" - {}", escape_text(proficiency)));
            }
            Some(SectionContent::with_content(content))
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Personal details
// ────────────────────────────────────────────────────────────────────────────

/// Email, phone, location, in that order. Blanks are skipped.
pub fn generate_contact_content(data: &ResumeData) -> Vec<SectionContent> {
    let mut items = Vec::new();
    if present(&data.email).is_some() {
        items.push(SectionContent::with_content(convert_email(&data.email)));
    }
    if let Some(phone) = present(&data.phone) {
        items.push(SectionContent::with_content(escape_text(phone)));
    }
    if let Some(location) = present(&data.location) {
        items.push(SectionContent::with_content(escape_text(location)));
    }
    items
}

pub fn generate_social_links_content(data: &ResumeData) -> Vec<SectionContent> {
    data.social_links
        .iter()
        .filter(|link| present(&link.platform).is_some() && present(&link.url).is_some())
        .map(|link| {
            SectionContent::with_content(convert_link(&link.url, &social_link_label(link)))
        })
        .collect()
}
