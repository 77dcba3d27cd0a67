//! Typst escaping and primitive markup converters.
//!
//! Every function here is pure and total: blank input produces an empty
//! fragment, never a panic. Plain text must pass through `escape_text` before
//! it lands in markup; URLs go through `escape_string` because they are
//! embedded in string literals instead.

use crate::layout::config::HEADER_SPACING;

/// Characters with markup meaning somewhere in Typst (inline or at line start).
/// A backslash before any non-whitespace character yields that character
/// literally, so over-escaping is always safe.
const RESERVED: &[char] = &[
    '\\', '#', '$', '*', '_', '`', '<', '>', '@', '[', ']', '~', '=', '+', '-', '/', '.', '\'',
    '"',
];

/// Separator between a date and its link icon, and between project title and link.
pub const INLINE_SEPARATOR: &str = " • ";

/// Floor for sizes derived from the body size.
pub const MIN_TEXT_SIZE: f32 = 1.0;

/// Body size shifted by `delta` points, never below `MIN_TEXT_SIZE`.
pub fn relative_size(font_size: f32, delta: f32) -> f32 {
    (font_size + delta).max(MIN_TEXT_SIZE)
}

/// Escapes free text so it renders literally inside Typst markup.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 4);
    for c in s.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escapes a value for use inside a Typst string literal (`"..."`).
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' | '\t' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Links and dates
// ────────────────────────────────────────────────────────────────────────────

/// Clickable hyperlink. A blank label falls back to the URL itself.
pub fn convert_link(url: &str, label: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    let label = if label.trim().is_empty() { url } else { label };
    format!("#link(\"{}\")[{}]", escape_string(url), escape_text(label))
}

/// `mailto:` link displaying the address.
pub fn convert_email(address: &str) -> String {
    let address = address.trim();
    if address.is_empty() {
        return String::new();
    }
    format!(
        "#link(\"mailto:{}\")[{}]",
        escape_string(address),
        escape_text(address)
    )
}

/// Compact link rendered as a north-east arrow glyph.
pub fn convert_external_link_icon(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    format!("#link(\"{}\")[#sym.arrow.tr]", escape_string(url))
}

/// Display string for a date range. Dates are passed through verbatim.
///
/// `is_present` wins over `end`; with neither, only `start` is shown.
pub fn convert_date_range(start: &str, end: &str, is_present: bool) -> String {
    let start = start.trim();
    let end = end.trim();
    let end = if is_present { "Present" } else { end };

    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} – {end}"),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (true, true) => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Structural helpers
// ────────────────────────────────────────────────────────────────────────────

/// Bullet list, one escaped item per line.
pub fn convert_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", escape_text(item.trim())))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Side-by-side columns using Typst's grid primitive.
pub fn convert_grid(columns: &[String], column_spec: &str) -> String {
    let cells = columns
        .iter()
        .map(|content| format!("  [\n{content}\n  ]"))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("#grid(\n  columns: {column_spec},\n  column-gutter: 20pt,\n{cells}\n)")
}

/// Section title: bold, two points above the body size.
pub fn render_template_header(text: &str, font_size: f32) -> String {
    format!(
        "#block(above: 0em, below: {HEADER_SPACING})[#text(size: {}pt, weight: \"bold\")[{}]]",
        relative_size(font_size, 2.0),
        escape_text(text)
    )
}

/// Record title (position at company, degree at institution, …).
pub fn render_template_sub_header(text: &str, font_size: f32) -> String {
    format!(
        "#text(size: {}pt, weight: \"bold\")[{}]",
        font_size,
        escape_text(text)
    )
}

pub fn render_template_date(date: &str, font_size: f32) -> String {
    if date.trim().is_empty() {
        return String::new();
    }
    format!(
        "#text(size: {}pt, fill: luma(100))[{}]",
        relative_size(font_size, -2.0),
        escape_text(date)
    )
}

/// Date line with an optional trailing link fragment (already markup).
pub fn render_template_date_with_link(date: &str, link: Option<&str>, font_size: f32) -> String {
    let date = render_template_date(date, font_size);
    match link.filter(|l| !l.trim().is_empty()) {
        Some(link) if date.is_empty() => link.to_string(),
        Some(link) => format!("{date}{INLINE_SEPARATOR}{link}"),
        None => date,
    }
}
