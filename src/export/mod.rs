pub mod json_export;

pub use json_export::JsonExporter;

use anyhow::Result;

use crate::core::model::Outline;

pub trait Exporter {
    fn export(&self, outline: &Outline) -> Result<()>;
}
