//! Typed edit vocabulary for the active resume.
//!
//! Each `ResumeEdit` applies to an owned `ResumeData` copy and reports whether
//! anything changed. Out-of-range indices leave the data untouched.

use serde::Deserialize;

use crate::models::resume::{
    Achievement, Certificate, Education, Experience, Language, Placement, Project, ResumeData,
    SectionKey, SectionOrder, SkillItem, SocialLink, Volunteering,
};

/// Add, replace, remove or reorder one element of a list field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ListEdit<T> {
    /// Appends `item`, or a blank entry when omitted.
    Add {
        #[serde(default)]
        item: Option<T>,
    },
    Update { index: usize, item: T },
    Remove { index: usize },
    /// Takes the element out at `from` and reinserts it at `to` (clamped).
    Move { from: usize, to: usize },
}

impl<T> ListEdit<T> {
    pub fn apply(self, list: &mut Vec<T>, blank: impl FnOnce() -> T) -> bool {
        match self {
            ListEdit::Add { item } => {
                list.push(item.unwrap_or_else(blank));
                true
            }
            ListEdit::Update { index, item } => match list.get_mut(index) {
                Some(slot) => {
                    *slot = item;
                    true
                }
                None => false,
            },
            ListEdit::Remove { index } => {
                if index >= list.len() {
                    return false;
                }
                list.remove(index);
                true
            }
            ListEdit::Move { from, to } => {
                if from >= list.len() {
                    return false;
                }
                let item = list.remove(from);
                let to = to.min(list.len());
                list.insert(to, item);
                from != to
            }
        }
    }
}

/// Scalar text fields on the resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FirstName,
    LastName,
    Email,
    Phone,
    Position,
    Location,
    Summary,
    TechnicalSkills,
    SoftSkills,
}

impl PersonalField {
    fn slot(self, data: &mut ResumeData) -> &mut String {
        match self {
            PersonalField::FirstName => &mut data.first_name,
            PersonalField::LastName => &mut data.last_name,
            PersonalField::Email => &mut data.email,
            PersonalField::Phone => &mut data.phone,
            PersonalField::Position => &mut data.position,
            PersonalField::Location => &mut data.location,
            PersonalField::Summary => &mut data.summary,
            PersonalField::TechnicalSkills => &mut data.technical_skills,
            PersonalField::SoftSkills => &mut data.soft_skills,
        }
    }
}

/// One edit to the active resume, as accepted by `PATCH /api/v1/resumes/active`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ResumeEdit {
    SetField { field: PersonalField, value: String },

    Experiences { edit: ListEdit<Experience> },
    ExperienceAchievements { index: usize, edit: ListEdit<Achievement> },
    Internships { edit: ListEdit<Experience> },
    InternshipAchievements { index: usize, edit: ListEdit<Achievement> },
    Education { edit: ListEdit<Education> },
    Volunteering { edit: ListEdit<Volunteering> },
    VolunteeringAchievements { index: usize, edit: ListEdit<Achievement> },
    Skills { edit: ListEdit<SkillItem> },
    SocialLinks { edit: ListEdit<SocialLink> },
    Projects { edit: ListEdit<Project> },
    Languages { edit: ListEdit<Language> },
    Certificates { edit: ListEdit<Certificate> },

    SetSectionOrder { order: SectionOrder },
    MoveSectionUp { section: SectionKey },
    MoveSectionDown { section: SectionKey },
    /// `key` is a header key (`profile`, `info`, `personalInfo`, or a section key).
    SetSectionHeader { key: String, value: String },
    SetSectionPlacement { section: SectionKey, placement: Placement },
}

fn blank_experience() -> Experience {
    Experience {
        achievements: vec![Achievement::new("")],
        ..Default::default()
    }
}

fn blank_social_link() -> SocialLink {
    SocialLink {
        platform: "linkedin".to_string(),
        ..Default::default()
    }
}

fn edit_achievements(
    achievements: Option<&mut Vec<Achievement>>,
    edit: ListEdit<Achievement>,
) -> bool {
    match achievements {
        Some(list) => edit.apply(list, || Achievement::new("")),
        None => false,
    }
}

/// Swaps `section` with whichever key holds the rank `delta` away.
fn shift_section(order: &mut SectionOrder, section: SectionKey, delta: i32) -> bool {
    let Some(current) = order.get(section.as_str()).copied() else {
        return false;
    };
    if delta < 0 && current <= 0 {
        return false;
    }
    let max = order.values().copied().max().unwrap_or(current);
    if delta > 0 && current >= max {
        return false;
    }

    let target_rank = current + delta;
    let Some(target) = order
        .iter()
        .find(|(_, rank)| **rank == target_rank)
        .map(|(key, _)| key.clone())
    else {
        return false;
    };

    order.insert(section.as_str().to_string(), target_rank);
    order.insert(target, current);
    true
}

impl ResumeEdit {
    pub fn apply(self, data: &mut ResumeData) -> bool {
        match self {
            ResumeEdit::SetField { field, value } => {
                *field.slot(data) = value;
                true
            }

            ResumeEdit::Experiences { edit } => edit.apply(&mut data.experiences, blank_experience),
            ResumeEdit::ExperienceAchievements { index, edit } => edit_achievements(
                data.experiences.get_mut(index).map(|e| &mut e.achievements),
                edit,
            ),
            ResumeEdit::Internships { edit } => edit.apply(&mut data.internships, blank_experience),
            ResumeEdit::InternshipAchievements { index, edit } => edit_achievements(
                data.internships.get_mut(index).map(|e| &mut e.achievements),
                edit,
            ),
            ResumeEdit::Education { edit } => edit.apply(&mut data.education, Education::default),
            ResumeEdit::Volunteering { edit } => {
                edit.apply(&mut data.volunteering, Volunteering::default)
            }
            ResumeEdit::VolunteeringAchievements { index, edit } => edit_achievements(
                data.volunteering.get_mut(index).map(|v| &mut v.achievements),
                edit,
            ),
            ResumeEdit::Skills { edit } => edit.apply(&mut data.skills, SkillItem::default),
            ResumeEdit::SocialLinks { edit } => {
                edit.apply(&mut data.social_links, blank_social_link)
            }
            ResumeEdit::Projects { edit } => edit.apply(&mut data.projects, Project::default),
            ResumeEdit::Languages { edit } => edit.apply(&mut data.languages, Language::default),
            ResumeEdit::Certificates { edit } => {
                edit.apply(&mut data.certificates, Certificate::default)
            }

            ResumeEdit::SetSectionOrder { order } => {
                data.section_order = order;
                true
            }
            ResumeEdit::MoveSectionUp { section } => {
                shift_section(&mut data.section_order, section, -1)
            }
            ResumeEdit::MoveSectionDown { section } => {
                shift_section(&mut data.section_order, section, 1)
            }
            ResumeEdit::SetSectionHeader { key, value } => {
                data.section_headers.insert(key, value);
                true
            }
            ResumeEdit::SetSectionPlacement { section, placement } => {
                data.section_placement
                    .insert(section.as_str().to_string(), placement);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(list: &[Language]) -> Vec<&str> {
        list.iter().map(|l| l.name.as_str()).collect()
    }

    fn languages(names: &[&str]) -> Vec<Language> {
        names
            .iter()
            .map(|n| Language {
                name: n.to_string(),
                proficiency: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_list_edit_move_and_clamp() {
        let mut list = languages(&["a", "b", "c"]);
        assert!(ListEdit::Move { from: 0, to: 2 }.apply(&mut list, Language::default));
        assert_eq!(labels(&list), vec!["b", "c", "a"]);

        assert!(!ListEdit::Move { from: 2, to: 99 }.apply(&mut list, Language::default));
        assert_eq!(labels(&list), vec!["b", "c", "a"]);

        assert!(ListEdit::Move { from: 0, to: 99 }.apply(&mut list, Language::default));
        assert_eq!(labels(&list), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_list_edit_out_of_range_is_noop() {
        let mut list = languages(&["a"]);
        let item = Language::default();
        assert!(!ListEdit::Update { index: 3, item }.apply(&mut list, Language::default));
        assert!(!ListEdit::Remove { index: 1 }.apply(&mut list, Language::default));
        assert!(!ListEdit::Move { from: 5, to: 0 }.apply(&mut list, Language::default));
        assert_eq!(labels(&list), vec!["a"]);
    }

    #[test]
    fn test_add_experience_starts_with_blank_achievement() {
        let mut data = ResumeData::default();
        let edit: ResumeEdit =
            serde_json::from_value(json!({"type": "experiences", "edit": {"op": "add"}})).unwrap();
        assert!(edit.apply(&mut data));
        assert_eq!(data.experiences.len(), 1);
        assert_eq!(data.experiences[0].achievements, vec![Achievement::new("")]);
    }

    #[test]
    fn test_add_social_link_defaults_to_linkedin() {
        let mut data = ResumeData::default();
        let edit = ResumeEdit::SocialLinks {
            edit: ListEdit::Add { item: None },
        };
        assert!(edit.apply(&mut data));
        assert_eq!(data.social_links[0].platform, "linkedin");
    }

    #[test]
    fn test_achievement_edits_need_parent() {
        let mut data = ResumeData::default();
        let edit = ResumeEdit::VolunteeringAchievements {
            index: 0,
            edit: ListEdit::Add { item: None },
        };
        assert!(!edit.apply(&mut data));

        data.volunteering.push(Volunteering::default());
        let edit: ResumeEdit = serde_json::from_value(json!({
            "type": "volunteeringAchievements",
            "index": 0,
            "edit": {"op": "add", "item": {"text": "Ran the food bank"}}
        }))
        .unwrap();
        assert!(edit.apply(&mut data));
        assert_eq!(data.volunteering[0].achievements[0].text, "Ran the food bank");
    }

    #[test]
    fn test_set_field_from_json() {
        let mut data = ResumeData::default();
        let edit: ResumeEdit = serde_json::from_value(json!({
            "type": "setField", "field": "firstName", "value": "Ada"
        }))
        .unwrap();
        assert!(edit.apply(&mut data));
        assert_eq!(data.first_name, "Ada");
    }

    #[test]
    fn test_move_section_up_swaps_neighbours() {
        let mut data = ResumeData::default();
        // education 1, experience 2
        assert!(ResumeEdit::MoveSectionUp {
            section: SectionKey::Experience
        }
        .apply(&mut data));
        assert_eq!(data.rank(SectionKey::Experience), Some(1));
        assert_eq!(data.rank(SectionKey::Education), Some(2));
    }

    #[test]
    fn test_move_section_bounds() {
        let mut data = ResumeData::default();
        assert!(!ResumeEdit::MoveSectionUp {
            section: SectionKey::Summary
        }
        .apply(&mut data));
        assert!(!ResumeEdit::MoveSectionDown {
            section: SectionKey::Certificates
        }
        .apply(&mut data));

        data.section_order.remove("skills");
        assert!(!ResumeEdit::MoveSectionDown {
            section: SectionKey::Skills
        }
        .apply(&mut data));
    }

    #[test]
    fn test_move_section_down_without_neighbour_is_noop() {
        let mut data = ResumeData::default();
        data.section_order.clear();
        data.section_order.insert("summary".to_string(), 0);
        data.section_order.insert("skills".to_string(), 5);
        let before = data.section_order.clone();
        assert!(!ResumeEdit::MoveSectionDown {
            section: SectionKey::Summary
        }
        .apply(&mut data));
        assert_eq!(data.section_order, before);
    }

    #[test]
    fn test_header_and_placement_updates() {
        let mut data = ResumeData::default();
        let edit: ResumeEdit = serde_json::from_value(json!({
            "type": "setSectionPlacement", "section": "projects", "placement": "left"
        }))
        .unwrap();
        assert!(edit.apply(&mut data));
        assert_eq!(data.placement(SectionKey::Projects), Placement::Left);

        assert!(ResumeEdit::SetSectionHeader {
            key: "profile".to_string(),
            value: "About".to_string()
        }
        .apply(&mut data));
        assert_eq!(data.section_header(SectionKey::Summary), "About");
    }
}
