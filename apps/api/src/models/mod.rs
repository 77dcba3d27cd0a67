pub mod resume;
pub mod settings;
