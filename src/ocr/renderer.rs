use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::error::ExtractError;

/// Rasterizes every page of a PDF to PNG images via pdftoppm.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    dpi: u32,
}

impl PageRenderer {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    /// Renders all pages into `out_dir` and returns the image paths in page
    /// order. Any rasterization failure is fatal for the image-based pass.
    pub fn render_all(&self, pdf_path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
        let prefix = out_dir.join("page");
        let prefix_str = prefix.to_str().ok_or_else(|| ExtractError::Rasterization {
            path: pdf_path.to_path_buf(),
            reason: "non-UTF8 output path not supported".to_string(),
        })?;

        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(pdf_path)
            .arg(prefix_str)
            .output()
            .map_err(|e| ExtractError::Rasterization {
                path: pdf_path.to_path_buf(),
                reason: format!("failed to invoke pdftoppm (is poppler-utils installed?): {e}"),
            })?;

        if !output.status.success() {
            return Err(ExtractError::Rasterization {
                path: pdf_path.to_path_buf(),
                reason: format!(
                    "pdftoppm exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        // pdftoppm writes page-<n>.png with zero-padded page numbers, so the
        // lexical filename order is the page order.
        let mut images: Vec<PathBuf> = fs::read_dir(out_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension().and_then(|ext| ext.to_str()) == Some("png")
                    && path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| name.starts_with("page-"))
            })
            .collect();
        images.sort();

        if images.is_empty() {
            return Err(ExtractError::Rasterization {
                path: pdf_path.to_path_buf(),
                reason: "pdftoppm produced no page images".to_string(),
            });
        }

        Ok(images)
    }
}
