//! Compact template: one dense column under a two-part header.

use crate::layout::config::{compact_layout_config, TemplateLayoutConfig, SECTION_SPACING};
use crate::models::resume::{ResumeData, SectionKey};
use crate::render::generators::generate_contact_content;
use crate::render::sections::render_social_links;
use crate::render::typst::{escape_text, relative_size};
use crate::templates::{
    compose_document, full_name, render_keys, sort_by_section_order, ResumeTemplate,
};

const SECTIONS: [SectionKey; 8] = [
    SectionKey::Education,
    SectionKey::Experience,
    SectionKey::Internships,
    SectionKey::Skills,
    SectionKey::Projects,
    SectionKey::Volunteering,
    SectionKey::Languages,
    SectionKey::Certificates,
];

pub struct CompactTemplate;

fn header_left_rows(data: &ResumeData, font_size: f32) -> Vec<String> {
    let mut rows = vec![format!(
        "#text(size: {}pt, weight: \"bold\")[{}]",
        relative_size(font_size, 12.0),
        full_name(data)
    )];

    let position = data.position.trim();
    if !position.is_empty() {
        rows.push(format!(
            "#block(above: 0.8em)[#text(size: {}pt)[{}]]",
            relative_size(font_size, 2.0),
            escape_text(position)
        ));
    }
    rows
}

/// Email, phone, location, then the inline link row. The first row sits flush.
fn header_right_rows(
    data: &ResumeData,
    font_size: f32,
    config: &TemplateLayoutConfig,
) -> Vec<String> {
    let mut fragments: Vec<String> = generate_contact_content(data)
        .into_iter()
        .map(|item| item.content)
        .collect();

    let links = render_social_links(data, font_size, config);
    if !links.is_empty() {
        fragments.push(links);
    }

    fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| {
            let above = if i == 0 { "0em" } else { "0.8em" };
            format!(
                "#block(above: {above})[#text(size: {}pt)[{fragment}]]",
                relative_size(font_size, -1.0)
            )
        })
        .collect()
}

fn render_header(data: &ResumeData, font_size: f32, config: &TemplateLayoutConfig) -> String {
    let indent = |rows: Vec<String>| -> String {
        rows.iter().map(|row| format!("        {row}\n")).collect()
    };

    let mut header = format!(
        "#grid(\n    columns: (6fr, 4fr),\n    column-gutter: 20pt,\n    align: (left, left),\n    [\n{}    ],\n    [\n{}    ]\n)\n",
        indent(header_left_rows(data, font_size)),
        indent(header_right_rows(data, font_size, config)),
    );
    header.push_str("#block(above: 1em, below: 1em)[#line(length: 100%, stroke: 1pt + black)]");

    let summary = data.summary.trim();
    if !summary.is_empty() {
        header.push_str(&format!(
            "\n#block(above: 0em, below: {SECTION_SPACING})[#text(size: {font_size}pt)[{}]]",
            escape_text(summary)
        ));
    }
    header
}

impl ResumeTemplate for CompactTemplate {
    fn id(&self) -> &'static str {
        "compact"
    }

    fn name(&self) -> &'static str {
        "Compact"
    }

    fn description(&self) -> &'static str {
        "Single column template for comprehensive resumes with more information"
    }

    fn layout_config(&self) -> TemplateLayoutConfig {
        compact_layout_config()
    }

    fn parse(&self, data: &ResumeData, font: &str, font_size: f32) -> String {
        let config = self.layout_config();

        let mut keys = SECTIONS.to_vec();
        sort_by_section_order(&mut keys, data);
        let sections = render_keys(&keys, data, font_size, &config).join("\n\n");

        let mut body = render_header(data, font_size, &config);
        if !sections.is_empty() {
            body.push_str("\n\n");
            body.push_str(&sections);
        }
        compose_document(&config, font, font_size, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Certificate, Education, Experience, Project, SocialLink};

    fn sample() -> ResumeData {
        ResumeData {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            position: "Rear Admiral".to_string(),
            email: "grace@navy.mil".to_string(),
            phone: "555-0100".to_string(),
            social_links: vec![SocialLink {
                platform: "github".to_string(),
                url: "https://github.com/grace".to_string(),
                custom_label: String::new(),
            }],
            education: vec![Education {
                degree: "PhD".to_string(),
                institution: "Yale".to_string(),
                ..Default::default()
            }],
            experiences: vec![Experience {
                position: "Programmer".to_string(),
                company: "Harvard".to_string(),
                ..Default::default()
            }],
            projects: vec![Project {
                title: "COBOL".to_string(),
                ..Default::default()
            }],
            certificates: vec![Certificate {
                title: "Computing".to_string(),
                issuer: "Yale".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_preamble_sets_leading() {
        let out = CompactTemplate.parse(&sample(), "Roboto", 11.0);
        assert!(out.starts_with(
            "#set page(margin: 1cm)\n#set text(font: (\"Roboto\"), size: 11pt)\n#set par(leading: 0.4em)\n\n#grid("
        ));
        assert!(out.ends_with("#pagebreak(weak: true)"));
    }

    #[test]
    fn test_header_grid_rows() {
        let out = CompactTemplate.parse(&sample(), "Calibri", 14.0);
        assert!(out.contains("columns: (6fr, 4fr)"));
        assert!(out.contains("        #text(size: 26pt, weight: \"bold\")[Grace Hopper]\n"));
        assert!(out.contains("#block(above: 0.8em)[#text(size: 16pt)[Rear Admiral]]"));
        assert!(out.contains(
            "#block(above: 0em)[#text(size: 13pt)[#link(\"mailto:grace@navy.mil\")"
        ));
        assert!(out.contains("#block(above: 0.8em)[#text(size: 13pt)[555\\-0100]]"));
        assert!(out.contains("[#link(\"https://github.com/grace\")[GitHub]]]"));
        assert!(out.contains("#line(length: 100%, stroke: 1pt + black)"));
    }

    #[test]
    fn test_first_contact_row_is_flush() {
        let data = ResumeData {
            phone: "555".to_string(),
            ..Default::default()
        };
        let out = CompactTemplate.parse(&data, "Calibri", 14.0);
        assert!(out.contains("#block(above: 0em)[#text(size: 13pt)[555]]"));
    }

    #[test]
    fn test_sections_follow_rank() {
        let mut data = sample();
        let out = CompactTemplate.parse(&data, "Calibri", 14.0);
        let education = out.find("[Education]").unwrap();
        let experience = out.find("[Employment History]").unwrap();
        let projects = out.find("[Projects]").unwrap();
        let certificates = out.find("[Certificates]").unwrap();
        assert!(education < experience);
        assert!(experience < projects && projects < certificates);

        data.section_order.insert("certificates".to_string(), -1);
        let out = CompactTemplate.parse(&data, "Calibri", 14.0);
        assert!(out.find("[Certificates]").unwrap() < out.find("[Employment History]").unwrap());
    }

    #[test]
    fn test_summary_and_links_not_rendered_as_sections() {
        let mut data = sample();
        data.summary = "Invented the compiler".to_string();
        let out = CompactTemplate.parse(&data, "Calibri", 14.0);
        assert!(out.contains("[#text(size: 14pt)[Invented the compiler]]"));
        assert!(!out.contains("[Profile]"));
        assert!(!out.contains("[Links]"));
    }

    #[test]
    fn test_tiny_font_size_keeps_contact_rows_visible() {
        let out = CompactTemplate.parse(&sample(), "Calibri", 1.5);
        assert!(out.contains("size: 1.5pt)"));
        assert!(out.contains("#block(above: 0.8em)[#text(size: 1pt)[555\\-0100]]"));
        assert!(!out.contains("size: 0.5pt"));
    }

    #[test]
    fn test_empty_resume_has_no_section_blocks() {
        let out = CompactTemplate.parse(&ResumeData::default(), "Calibri", 14.0);
        assert!(!out.contains("#block(above: 0em, below: 1.2em)[\n"));
        assert_eq!(out, CompactTemplate.parse(&ResumeData::default(), "Calibri", 14.0));
    }
}
