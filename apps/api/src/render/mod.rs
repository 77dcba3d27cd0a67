// Rendering core: resume data → Typst markup.
// Pure and synchronous; no I/O, no shared state. Same input, same bytes.

pub mod formatters;
pub mod generators;
pub mod sections;
pub mod typst;
