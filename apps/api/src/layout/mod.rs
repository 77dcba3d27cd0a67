// Static per-template layout descriptions: page setup, spacing, columns,
// social-link presentation.

pub mod config;
