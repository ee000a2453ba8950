pub mod engine;
pub mod extractor;
pub mod renderer;

pub use engine::TesseractEngine;
pub use extractor::OcrExtractor;
pub use renderer::PageRenderer;

use std::path::Path;

use crate::core::error::ExtractError;
use crate::core::model::Heading;

/// Image-based heading source: rasterizes pages, recognizes text, and
/// classifies lines by shape alone. No font signal exists on this path, so
/// it never produces H1.
pub trait OcrTrack {
    fn extract_headings(&self, pdf_path: &Path) -> Result<Vec<Heading>, ExtractError>;
}
