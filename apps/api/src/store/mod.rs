//! Resume workspace: the set of named resumes and which one is active.
//!
//! Resume data is shared as `Arc<ResumeData>` snapshots. Mutations copy the
//! current snapshot, change the copy and publish a fresh `Arc`, so a snapshot
//! handed to a renderer never changes underneath it.

pub mod edits;
pub mod handlers;
pub mod repository;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::models::resume::{default_section_order, Resume, ResumeData, SectionKey};
use crate::templates::UNORDERED_RANK;
use edits::ResumeEdit;

pub const INITIAL_RESUME_NAME: &str = "My Resume";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Insertion order, which is also creation order.
    resumes: Vec<Resume>,
    active_resume_id: Option<String>,
    next_id: u64,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            resumes: Vec::new(),
            active_resume_id: None,
            next_id: 1,
        }
    }
}

/// `resume-{n}` → `n`.
fn id_number(id: &str) -> Option<u64> {
    id.strip_prefix("resume-")?.parse().ok()
}

impl Workspace {
    /// Rebuilds a workspace from persisted resumes. The id counter resumes
    /// past the highest existing id; an unknown active id is dropped.
    pub fn from_parts(mut resumes: Vec<Resume>, active_resume_id: Option<String>) -> Self {
        resumes.sort_by_key(|r| r.created_at);
        let next_id = resumes
            .iter()
            .filter_map(|r| id_number(&r.id))
            .max()
            .map_or(1, |n| n + 1);
        let active_resume_id = active_resume_id.filter(|id| resumes.iter().any(|r| &r.id == id));
        Self {
            resumes,
            active_resume_id,
            next_id,
        }
    }

    /// Startup normalization: backfill rank defaults that older payloads lack,
    /// make sure at least one resume exists, and that one is active.
    pub fn initialize(&mut self) {
        for resume in &mut self.resumes {
            let order = &resume.data.section_order;
            if order.contains_key("projects") && order.contains_key("languages") {
                continue;
            }
            let mut data = (*resume.data).clone();
            data.section_order.entry("projects".to_string()).or_insert(6);
            data.section_order.entry("languages".to_string()).or_insert(7);
            resume.data = Arc::new(data);
        }

        if self.resumes.is_empty() {
            self.create(Some(INITIAL_RESUME_NAME));
        }
        if self.active_resume_id.is_none() {
            self.active_resume_id = self.resumes.first().map(|r| r.id.clone());
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Queries
    // ────────────────────────────────────────────────────────────────────────

    pub fn get(&self, id: &str) -> Option<&Resume> {
        self.resumes.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Resume> {
        self.resumes.iter_mut().find(|r| r.id == id)
    }

    /// All resumes, oldest first.
    pub fn list(&self) -> &[Resume] {
        &self.resumes
    }

    pub fn len(&self) -> usize {
        self.resumes.len()
    }

    pub fn active_resume_id(&self) -> Option<&str> {
        self.active_resume_id.as_deref()
    }

    pub fn active(&self) -> Option<&Resume> {
        self.active_resume_id.as_deref().and_then(|id| self.get(id))
    }

    /// Snapshot of the active resume's data; defaults when nothing is active.
    pub fn active_data(&self) -> Arc<ResumeData> {
        self.active()
            .map(|r| Arc::clone(&r.data))
            .unwrap_or_default()
    }

    /// "First Last" of the active resume, skipping blank parts.
    pub fn full_name(&self) -> String {
        let Some(resume) = self.active() else {
            return String::new();
        };
        [resume.data.first_name.trim(), resume.data.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Sections of the active resume that hold any content.
    pub fn sections_with_data(&self) -> Vec<SectionKey> {
        let Some(resume) = self.active() else {
            return Vec::new();
        };
        let data = &resume.data;
        let filled = [
            (SectionKey::Summary, !data.summary.is_empty()),
            (SectionKey::Experience, !data.experiences.is_empty()),
            (SectionKey::Education, !data.education.is_empty()),
            (SectionKey::Skills, !data.skills.is_empty()),
            (SectionKey::Volunteering, !data.volunteering.is_empty()),
            (SectionKey::SocialLinks, !data.social_links.is_empty()),
            (SectionKey::Projects, !data.projects.is_empty()),
            (SectionKey::Languages, !data.languages.is_empty()),
            (SectionKey::Internships, !data.internships.is_empty()),
            (SectionKey::Certificates, !data.certificates.is_empty()),
        ];
        filled
            .into_iter()
            .filter_map(|(key, has)| has.then_some(key))
            .collect()
    }

    /// Orderable sections of the active resume with their ranks, ascending.
    /// Missing ranks fall back to the stock order.
    pub fn ordered_sections(&self) -> Vec<(SectionKey, i32)> {
        let Some(resume) = self.active() else {
            return Vec::new();
        };
        let defaults = default_section_order();
        let mut sections: Vec<(SectionKey, i32)> = SectionKey::ALL
            .into_iter()
            .filter(|key| *key != SectionKey::ContactInfo)
            .map(|key| {
                let rank = resume
                    .data
                    .rank(key)
                    .or_else(|| defaults.get(key.as_str()).copied())
                    .unwrap_or(UNORDERED_RANK);
                (key, rank)
            })
            .collect();
        sections.sort_by_key(|(_, rank)| *rank);
        sections
    }

    // ────────────────────────────────────────────────────────────────────────
    // Mutations
    // ────────────────────────────────────────────────────────────────────────

    /// Creates a resume with default data. The first resume becomes active.
    pub fn create(&mut self, name: Option<&str>) -> String {
        self.create_with_data(name, ResumeData::default())
    }

    pub fn create_with_data(&mut self, name: Option<&str>, data: ResumeData) -> String {
        let id = format!("resume-{}", self.next_id);
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(n) => n.to_string(),
            None => format!("Resume {}", self.next_id),
        };
        let now = Utc::now();

        self.resumes.push(Resume {
            id: id.clone(),
            name,
            data: Arc::new(data),
            created_at: now,
            updated_at: now,
        });
        self.next_id += 1;

        if self.resumes.len() == 1 {
            self.active_resume_id = Some(id.clone());
        }
        id
    }

    pub fn set_active(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.active_resume_id = Some(id.to_string());
        true
    }

    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        let Some(resume) = self.get_mut(id) else {
            return false;
        };
        resume.name = name.to_string();
        resume.updated_at = Utc::now();
        true
    }

    /// Removes a resume. Deleting the active one activates the oldest remaining.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.resumes.len();
        self.resumes.retain(|r| r.id != id);
        if self.resumes.len() == before {
            return false;
        }
        if self.active_resume_id.as_deref() == Some(id) {
            self.active_resume_id = self.resumes.first().map(|r| r.id.clone());
        }
        true
    }

    /// Copies a resume under `"{name} (Copy)"`. The copy shares the source
    /// snapshot until either side is edited.
    pub fn duplicate(&mut self, id: &str) -> Option<String> {
        let source = self.get(id)?;
        let name = format!("{} (Copy)", source.name);
        let data = Arc::clone(&source.data);

        let new_id = format!("resume-{}", self.next_id);
        let now = Utc::now();
        self.resumes.push(Resume {
            id: new_id.clone(),
            name,
            data,
            created_at: now,
            updated_at: now,
        });
        self.next_id += 1;
        Some(new_id)
    }

    /// Replaces a resume's data wholesale.
    pub fn update_data(&mut self, id: &str, data: ResumeData) -> bool {
        let Some(resume) = self.get_mut(id) else {
            return false;
        };
        resume.data = Arc::new(data);
        resume.updated_at = Utc::now();
        true
    }

    pub fn reset_data(&mut self, id: &str) -> bool {
        self.update_data(id, ResumeData::default())
    }

    /// Applies an edit to the active resume. Returns false when there is no
    /// active resume or the edit changed nothing.
    pub fn apply_edit(&mut self, edit: ResumeEdit) -> bool {
        let Some(id) = self.active_resume_id.clone() else {
            return false;
        };
        let Some(resume) = self.get_mut(&id) else {
            return false;
        };

        let mut data = (*resume.data).clone();
        if !edit.apply(&mut data) {
            return false;
        }
        resume.data = Arc::new(data);
        resume.updated_at = Utc::now();
        true
    }
}
