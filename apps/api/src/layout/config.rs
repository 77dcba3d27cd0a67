//! Template layout configuration: static, per-template description of page
//! setup, spacing, column layout, and social-link presentation.
//!
//! Templates own one of these and hand it to every section renderer; nothing
//! here is user-editable.

use serde::Serialize;

use crate::models::resume::SectionKey;

/// Gap between consecutive top-level section blocks.
pub const SECTION_SPACING: &str = "1.2em";
/// Gap between consecutive items inside a block-spaced section.
pub const ITEMS_SPACING: &str = "0.5em";
/// Gap below a section header, also used between project entries.
pub const HEADER_SPACING: &str = "0.8em";

// ────────────────────────────────────────────────────────────────────────────
// Building blocks
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    /// Items are concatenated with `join_separator`.
    Joined,
    /// Each item is wrapped in a block with a fixed bottom gap.
    Block,
}

/// How items inside a section are separated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSpacing {
    pub spacing: Spacing,
    pub item_spacing: String,
    pub join_separator: String,
}

impl SectionSpacing {
    pub fn block(item_spacing: &str) -> Self {
        Self {
            spacing: Spacing::Block,
            item_spacing: item_spacing.to_string(),
            join_separator: String::new(),
        }
    }

    pub fn joined(separator: &str) -> Self {
        Self {
            spacing: Spacing::Joined,
            item_spacing: String::new(),
            join_separator: separator.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkPlacement {
    /// Inline in the document header, next to the contact details.
    Header,
    /// As a standalone titled section in a column.
    Sidebar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialLinksConfig {
    pub orientation: Orientation,
    pub placement: LinkPlacement,
    pub separator: String,
}

impl SocialLinksConfig {
    /// Links are embedded in the header rather than wrapped in a section block.
    pub fn is_inline(&self) -> bool {
        self.placement == LinkPlacement::Header && self.orientation == Orientation::Horizontal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnLayout {
    Single,
    TwoColumn,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnConfig {
    pub layout: ColumnLayout,
    pub left_ratio: String,
    pub right_ratio: String,
    /// Sections a user may route to either column via `sectionPlacement`.
    pub movable_sections: Vec<SectionKey>,
}

impl ColumnConfig {
    /// Grid column spec, e.g. `(7fr, 3fr)`.
    pub fn grid_spec(&self) -> String {
        format!("({}, {})", self.left_ratio, self.right_ratio)
    }
}

/// Page-level `#set` rules emitted ahead of the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSetup {
    pub margin: String,
    pub leading: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateLayoutConfig
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLayoutConfig {
    pub page: PageSetup,
    pub columns: ColumnConfig,
    pub sections: SectionSpacing,
    /// Gap between project entries when sections use block spacing.
    pub projects_item_spacing: String,
    pub social_links: SocialLinksConfig,
}

impl TemplateLayoutConfig {
    pub fn is_two_column(&self) -> bool {
        self.columns.layout == ColumnLayout::TwoColumn
    }
}

/// Two-column layout: main content left, contact and short sections right.
pub fn default_layout_config() -> TemplateLayoutConfig {
    TemplateLayoutConfig {
        page: PageSetup {
            margin: "1.2cm".to_string(),
            leading: None,
        },
        columns: ColumnConfig {
            layout: ColumnLayout::TwoColumn,
            left_ratio: "7fr".to_string(),
            right_ratio: "3fr".to_string(),
            movable_sections: vec![
                SectionKey::Skills,
                SectionKey::Projects,
                SectionKey::Languages,
                SectionKey::Volunteering,
                SectionKey::Certificates,
            ],
        },
        sections: SectionSpacing::block(ITEMS_SPACING),
        projects_item_spacing: HEADER_SPACING.to_string(),
        social_links: SocialLinksConfig {
            orientation: Orientation::Vertical,
            placement: LinkPlacement::Sidebar,
            separator: String::new(),
        },
    }
}

/// Single-column layout with contact details and links in the header.
pub fn compact_layout_config() -> TemplateLayoutConfig {
    TemplateLayoutConfig {
        page: PageSetup {
            margin: "1cm".to_string(),
            leading: Some("0.4em".to_string()),
        },
        columns: ColumnConfig {
            layout: ColumnLayout::Single,
            left_ratio: "1fr".to_string(),
            right_ratio: "0fr".to_string(),
            movable_sections: Vec::new(),
        },
        sections: SectionSpacing::joined("\n\n"),
        projects_item_spacing: HEADER_SPACING.to_string(),
        social_links: SocialLinksConfig {
            orientation: Orientation::Horizontal,
            placement: LinkPlacement::Header,
            separator: " • ".to_string(),
        },
    }
}
