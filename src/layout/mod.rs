pub mod extractor;
pub mod pdf_reader;
pub mod text_extractor;

pub use extractor::LayoutExtractor;
pub use pdf_reader::PdfReader;

use std::path::Path;

use crate::core::error::ExtractError;
use crate::core::model::Heading;

/// Layout-based heading source: classifies text lines from the document's
/// own content streams using font-size thresholds.
pub trait LayoutTrack {
    fn extract_headings(&self, pdf_path: &Path) -> Result<Vec<Heading>, ExtractError>;
}
