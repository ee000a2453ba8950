use std::path::PathBuf;

use thiserror::Error;

/// Document-level extraction failures. Per-line anomalies never surface as
/// errors; an unclassifiable candidate simply produces no heading.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input file cannot be opened or parsed at all. No partial result
    /// is produced for the document.
    #[error("cannot open or parse PDF {}: {source}", path.display())]
    UnreadablePdf {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    /// Page rasterization failed. Fatal for the document's image-based pass.
    #[error("failed to rasterize {}: {reason}", path.display())]
    Rasterization { path: PathBuf, reason: String },

    /// The OCR engine is unavailable or failed on a rendered page. Fatal for
    /// the document's image-based pass; the caller decides whether to keep
    /// the layout-based headings or fail the document.
    #[error("OCR engine failure on {}: {reason}", image.display())]
    OcrEngine { image: PathBuf, reason: String },

    #[error("I/O error during extraction")]
    Io(#[from] std::io::Error),
}
