use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::model::Outline;
use crate::export::Exporter;

/// Writes the outline as pretty-printed UTF-8 JSON.
#[derive(Debug, Clone)]
pub struct JsonExporter {
    out_path: PathBuf,
}

impl JsonExporter {
    pub fn new(out_path: PathBuf) -> Self {
        Self { out_path }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, outline: &Outline) -> Result<()> {
        if let Some(parent) = self.out_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_string_pretty(outline)?;
        fs::write(&self.out_path, data)
            .with_context(|| format!("failed to write {}", self.out_path.display()))?;
        Ok(())
    }
}
