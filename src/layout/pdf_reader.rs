use std::path::Path;

use lopdf::{Document, ObjectId};

use crate::core::error::ExtractError;

/// Parsed PDF document handle for the layout track.
pub struct PdfReader {
    document: Document,
}

impl PdfReader {
    /// Opens and parses the document. A file that cannot be parsed at all is
    /// fatal; no partial result is produced.
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let document = Document::load(path).map_err(|source| ExtractError::UnreadablePdf {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { document })
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Pages in document order with their 1-based page numbers.
    pub fn pages(&self) -> Vec<(u32, ObjectId)> {
        self.document.get_pages().into_iter().collect()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}
