use std::path::Path;
use std::process::Command;

use crate::core::error::ExtractError;

/// Thin wrapper over the tesseract binary. Returns newline-delimited plain
/// text with no positional or style metadata.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    lang: String,
}

impl TesseractEngine {
    pub fn new(lang: impl Into<String>) -> Self {
        Self { lang: lang.into() }
    }

    pub fn recognize(&self, image: &Path) -> Result<String, ExtractError> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .output()
            .map_err(|e| ExtractError::OcrEngine {
                image: image.to_path_buf(),
                reason: format!("failed to invoke tesseract (is it installed?): {e}"),
            })?;

        if !output.status.success() {
            return Err(ExtractError::OcrEngine {
                image: image.to_path_buf(),
                reason: format!(
                    "tesseract exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new("eng")
    }
}
