//! Resume data model: the normalized shape every template renders from.
//!
//! Every list defaults to empty and every optional text field defaults to `""`,
//! including when the incoming JSON carries an explicit `null`. Renderers can
//! therefore treat "missing" and "empty" identically.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Achievement {
    #[serde(deserialize_with = "nullable")]
    pub text: String,
}

impl Achievement {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A paid position. Internships share the exact same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    #[serde(deserialize_with = "nullable")]
    pub company: String,
    #[serde(deserialize_with = "nullable")]
    pub position: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "nullable")]
    pub company_url: String,
    #[serde(deserialize_with = "nullable")]
    pub start_date: String,
    #[serde(deserialize_with = "nullable")]
    pub end_date: String,
    /// When set, the rendered range is open-ended and `end_date` is ignored.
    #[serde(deserialize_with = "nullable")]
    pub is_present: bool,
    #[serde(deserialize_with = "nullable")]
    pub achievements: Vec<Achievement>,
}

impl Experience {
    pub fn is_blank(&self) -> bool {
        is_blank(&self.company)
            && is_blank(&self.position)
            && is_blank(&self.location)
            && is_blank(&self.company_url)
            && is_blank(&self.start_date)
            && is_blank(&self.end_date)
            && self.achievements.iter().all(|a| is_blank(&a.text))
    }
}

pub type Internship = Experience;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    #[serde(deserialize_with = "nullable")]
    pub institution: String,
    #[serde(deserialize_with = "nullable")]
    pub degree: String,
    #[serde(deserialize_with = "nullable")]
    pub field_of_study: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "nullable")]
    pub start_date: String,
    #[serde(deserialize_with = "nullable")]
    pub end_date: String,
    #[serde(deserialize_with = "nullable")]
    pub is_present: bool,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub graduation_score: String,
}

impl Education {
    pub fn is_blank(&self) -> bool {
        [
            &self.institution,
            &self.degree,
            &self.field_of_study,
            &self.location,
            &self.start_date,
            &self.end_date,
            &self.description,
            &self.graduation_score,
        ]
        .iter()
        .all(|s| is_blank(s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Volunteering {
    #[serde(deserialize_with = "nullable")]
    pub organization: String,
    #[serde(deserialize_with = "nullable")]
    pub position: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "nullable")]
    pub start_date: String,
    #[serde(deserialize_with = "nullable")]
    pub end_date: String,
    #[serde(deserialize_with = "nullable")]
    pub is_present: bool,
    #[serde(deserialize_with = "nullable")]
    pub achievements: Vec<Achievement>,
}

impl Volunteering {
    pub fn is_blank(&self) -> bool {
        is_blank(&self.organization)
            && is_blank(&self.position)
            && is_blank(&self.location)
            && is_blank(&self.start_date)
            && is_blank(&self.end_date)
            && self.achievements.iter().all(|a| is_blank(&a.text))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillItem {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialLink {
    #[serde(deserialize_with = "nullable")]
    pub platform: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    /// Only consulted when `platform` is `"other"`.
    #[serde(deserialize_with = "nullable")]
    pub custom_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub proficiency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub issuer: String,
    #[serde(deserialize_with = "nullable")]
    pub date: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
}

impl Certificate {
    pub fn is_blank(&self) -> bool {
        [
            &self.title,
            &self.issuer,
            &self.date,
            &self.url,
            &self.description,
        ]
        .iter()
        .all(|s| is_blank(s))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section keys, headers, placement
// ────────────────────────────────────────────────────────────────────────────

/// Every independently renderable block of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Summary,
    Experience,
    Education,
    Skills,
    Volunteering,
    SocialLinks,
    Projects,
    Languages,
    Internships,
    Certificates,
    ContactInfo,
}

impl SectionKey {
    pub const ALL: [SectionKey; 11] = [
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Skills,
        SectionKey::Volunteering,
        SectionKey::SocialLinks,
        SectionKey::Projects,
        SectionKey::Languages,
        SectionKey::Internships,
        SectionKey::Certificates,
        SectionKey::ContactInfo,
    ];

    /// Key used in `sectionOrder` and `sectionPlacement`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Summary => "summary",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Skills => "skills",
            SectionKey::Volunteering => "volunteering",
            SectionKey::SocialLinks => "socialLinks",
            SectionKey::Projects => "projects",
            SectionKey::Languages => "languages",
            SectionKey::Internships => "internships",
            SectionKey::Certificates => "certificates",
            SectionKey::ContactInfo => "contactInfo",
        }
    }

    #[cfg(test)]
    pub fn parse(key: &str) -> Option<SectionKey> {
        SectionKey::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Key used in `sectionHeaders`. The profile and contact blocks were
    /// historically titled under different names than their order keys.
    pub fn header_key(&self) -> &'static str {
        match self {
            SectionKey::Summary => "profile",
            SectionKey::ContactInfo => "info",
            other => other.as_str(),
        }
    }

    pub fn default_header(&self) -> &'static str {
        match self {
            SectionKey::Summary => "Profile",
            SectionKey::Experience => "Employment History",
            SectionKey::Education => "Education",
            SectionKey::Skills => "Skills",
            SectionKey::Volunteering => "Volunteering",
            SectionKey::SocialLinks => "Links",
            SectionKey::Projects => "Projects",
            SectionKey::Languages => "Languages",
            SectionKey::Internships => "Internships",
            SectionKey::Certificates => "Certificates",
            SectionKey::ContactInfo => "Info",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Left,
    #[default]
    Right,
}

/// Section key → rank. Lower renders first.
pub type SectionOrder = BTreeMap<String, i32>;
/// Header key → display title. Blank titles fall back to the builtin default.
pub type SectionHeaders = BTreeMap<String, String>;
/// Movable section key → column, only read by two-column templates.
pub type SectionPlacement = BTreeMap<String, Placement>;

pub fn default_section_order() -> SectionOrder {
    [
        ("summary", 0),
        ("education", 1),
        ("experience", 2),
        ("skills", 3),
        ("volunteering", 4),
        ("socialLinks", 5),
        ("projects", 6),
        ("languages", 7),
        ("internships", 8),
        ("certificates", 9),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

pub fn default_section_headers() -> SectionHeaders {
    let mut headers: SectionHeaders = SectionKey::ALL
        .iter()
        .map(|k| (k.header_key().to_string(), k.default_header().to_string()))
        .collect();
    headers.insert("personalInfo".to_string(), "Personal Information".to_string());
    headers
}

pub fn default_section_placement() -> SectionPlacement {
    ["skills", "projects", "volunteering", "languages", "certificates"]
        .into_iter()
        .map(|k| (k.to_string(), Placement::Right))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// ResumeData
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeData {
    #[serde(deserialize_with = "nullable")]
    pub version: String,
    #[serde(deserialize_with = "nullable")]
    pub first_name: String,
    #[serde(deserialize_with = "nullable")]
    pub last_name: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub phone: String,
    #[serde(deserialize_with = "nullable")]
    pub position: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "nullable")]
    pub summary: String,

    #[serde(deserialize_with = "nullable")]
    pub experiences: Vec<Experience>,
    #[serde(deserialize_with = "nullable")]
    pub internships: Vec<Internship>,
    #[serde(deserialize_with = "nullable")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "nullable")]
    pub volunteering: Vec<Volunteering>,
    #[serde(deserialize_with = "nullable")]
    pub skills: Vec<SkillItem>,
    #[serde(deserialize_with = "nullable")]
    pub social_links: Vec<SocialLink>,
    #[serde(deserialize_with = "nullable")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "nullable")]
    pub languages: Vec<Language>,
    #[serde(deserialize_with = "nullable")]
    pub certificates: Vec<Certificate>,

    /// Legacy freeform skills, rendered only while `skills` is empty.
    #[serde(deserialize_with = "nullable")]
    pub technical_skills: String,
    /// Legacy, kept for round-tripping; never rendered.
    #[serde(deserialize_with = "nullable")]
    pub soft_skills: String,

    #[serde(deserialize_with = "nullable")]
    pub section_order: SectionOrder,
    #[serde(deserialize_with = "nullable")]
    pub section_headers: SectionHeaders,
    #[serde(deserialize_with = "nullable")]
    pub section_placement: SectionPlacement,
}

impl Default for ResumeData {
    fn default() -> Self {
        Self {
            version: "v1".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            position: String::new(),
            location: String::new(),
            summary: String::new(),
            experiences: Vec::new(),
            internships: Vec::new(),
            education: Vec::new(),
            volunteering: Vec::new(),
            skills: Vec::new(),
            social_links: Vec::new(),
            projects: Vec::new(),
            languages: Vec::new(),
            certificates: Vec::new(),
            technical_skills: String::new(),
            soft_skills: String::new(),
            section_order: default_section_order(),
            section_headers: default_section_headers(),
            section_placement: default_section_placement(),
        }
    }
}

impl ResumeData {
    /// Display title for a section: the configured header, or the builtin default.
    pub fn section_header(&self, key: SectionKey) -> String {
        self.section_headers
            .get(key.header_key())
            .map(|h| h.trim())
            .filter(|h| !h.is_empty())
            .unwrap_or(key.default_header())
            .to_string()
    }

    pub fn placement(&self, key: SectionKey) -> Placement {
        self.section_placement
            .get(key.as_str())
            .copied()
            .unwrap_or_default()
    }

    pub fn rank(&self, key: SectionKey) -> Option<i32> {
        self.section_order.get(key.as_str()).copied()
    }

    /// Number of list entries counted by the import preview.
    pub fn item_count(&self) -> usize {
        self.experiences.len()
            + self.education.len()
            + self.skills.len()
            + self.projects.len()
            + self.languages.len()
            + self.volunteering.len()
            + self.certificates.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume (workspace entry)
// ────────────────────────────────────────────────────────────────────────────

/// One resume in the user's workspace. `data` is an immutable snapshot:
/// edits publish a new `Arc` instead of mutating the shared one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    pub name: String,
    pub data: Arc<ResumeData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_default_to_empty() {
        let data: ResumeData = serde_json::from_str(r#"{"firstName": "Ada"}"#).unwrap();
        assert_eq!(data.first_name, "Ada");
        assert!(data.experiences.is_empty());
        assert!(data.certificates.is_empty());
        assert_eq!(data.section_order, default_section_order());
    }

    #[test]
    fn test_null_fields_treated_as_empty() {
        let data: ResumeData = serde_json::from_str(
            r#"{"experiences": null, "skills": [{"title": null, "description": "Rust"}],
                "socialLinks": [{"platform": "other", "url": "https://x.dev", "customLabel": null}]}"#,
        )
        .unwrap();
        assert!(data.experiences.is_empty());
        assert_eq!(data.skills[0].title, "");
        assert_eq!(data.social_links[0].custom_label, "");
    }

    #[test]
    fn test_null_layout_maps_treated_as_empty() {
        let data: ResumeData = serde_json::from_str(
            r#"{"version": null, "sectionOrder": null, "sectionHeaders": null,
                "sectionPlacement": null, "firstName": "Ada"}"#,
        )
        .unwrap();
        assert_eq!(data.first_name, "Ada");
        assert_eq!(data.version, "");
        assert!(data.section_order.is_empty());
        assert_eq!(data.rank(SectionKey::Education), None);
        assert_eq!(data.section_header(SectionKey::Experience), "Employment History");
        assert_eq!(data.placement(SectionKey::Skills), Placement::Right);
    }

    #[test]
    fn test_section_header_falls_back_when_blank() {
        let mut data = ResumeData::default();
        data.section_headers
            .insert("experience".to_string(), "   ".to_string());
        assert_eq!(data.section_header(SectionKey::Experience), "Employment History");

        data.section_headers
            .insert("experience".to_string(), "Work".to_string());
        assert_eq!(data.section_header(SectionKey::Experience), "Work");

        data.section_headers.clear();
        assert_eq!(data.section_header(SectionKey::Summary), "Profile");
        assert_eq!(data.section_header(SectionKey::ContactInfo), "Info");
    }

    #[test]
    fn test_placement_defaults_to_right() {
        let mut data = ResumeData::default();
        data.section_placement.clear();
        assert_eq!(data.placement(SectionKey::Skills), Placement::Right);
        data.section_placement
            .insert("skills".to_string(), Placement::Left);
        assert_eq!(data.placement(SectionKey::Skills), Placement::Left);
    }

    #[test]
    fn test_blank_experience_detection() {
        let mut exp = Experience {
            achievements: vec![Achievement::new("  ")],
            is_present: true,
            ..Default::default()
        };
        assert!(exp.is_blank());
        exp.company = "Acme".to_string();
        assert!(!exp.is_blank());
    }

    #[test]
    fn test_section_key_round_trips_through_str() {
        for key in SectionKey::ALL {
            assert_eq!(SectionKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SectionKey::parse("hobbies"), None);
    }

    #[test]
    fn test_item_count_sums_counted_lists() {
        let data = ResumeData {
            experiences: vec![Experience::default(); 2],
            languages: vec![Language::default()],
            certificates: vec![Certificate::default()],
            social_links: vec![SocialLink::default(); 5],
            ..Default::default()
        };
        assert_eq!(data.item_count(), 4);
    }
}
