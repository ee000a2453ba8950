use std::path::Path;

use serde::{Deserialize, Serialize};

/// Heading grade inferred from typography (layout track) or line shape
/// (OCR track). The OCR track never produces `H1`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

/// One outline per processed document. Never mutated after assembly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outline {
    pub title: String,
    pub outline: Vec<Heading>,
}

/// Document title derived from the input filename: directory and extension
/// stripped, underscores replaced with spaces.
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}
