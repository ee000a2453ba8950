use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::error::ExtractError;
use crate::core::model::{title_from_path, Outline};
use crate::export::{Exporter, JsonExporter};
use crate::layout::{LayoutExtractor, LayoutTrack};
use crate::ocr::{OcrExtractor, OcrTrack};

/// Below this many layout-based headings the document is presumed scanned
/// and the image-based pass runs as well.
pub const FALLBACK_THRESHOLD: usize = 5;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dpi: u32,
    pub lang: String,
}

impl PipelineConfig {
    pub fn new(input: PathBuf, output: PathBuf, dpi: u32, lang: String) -> Self {
        Self {
            input,
            output,
            dpi,
            lang,
        }
    }
}

/// Assembles one outline from the two heading sources.
///
/// The layout track always runs. When it yields fewer than
/// [`FALLBACK_THRESHOLD`] headings, the OCR track runs too and its headings
/// are appended without deduplication. The combined set is stable-sorted by
/// page, so same-page headings keep their concatenation order. OCR failures
/// propagate; the caller decides whether to keep a layout-only result.
pub fn assemble(
    pdf_path: &Path,
    layout: &dyn LayoutTrack,
    ocr: &dyn OcrTrack,
) -> Result<Outline, ExtractError> {
    let mut headings = layout.extract_headings(pdf_path)?;
    if headings.len() < FALLBACK_THRESHOLD {
        headings.extend(ocr.extract_headings(pdf_path)?);
    }
    headings.sort_by_key(|heading| heading.page);

    Ok(Outline {
        title: title_from_path(pdf_path),
        outline: headings,
    })
}

pub fn build_outline(config: &PipelineConfig) -> Result<Outline> {
    let layout = LayoutExtractor::new();
    let ocr = OcrExtractor::new(config.dpi, config.lang.clone());
    let outline = assemble(&config.input, &layout, &ocr)
        .with_context(|| format!("failed to extract outline from {}", config.input.display()))?;
    Ok(outline)
}

pub fn export_outline(outline: &Outline, out_path: &Path) -> Result<()> {
    let exporter = JsonExporter::new(out_path.to_path_buf());
    exporter.export(outline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Heading, HeadingLevel};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn heading(level: HeadingLevel, text: &str, page: u32) -> Heading {
        Heading {
            level,
            text: text.to_string(),
            page,
        }
    }

    struct StubLayout(Vec<Heading>);

    impl LayoutTrack for StubLayout {
        fn extract_headings(&self, _pdf_path: &Path) -> Result<Vec<Heading>, ExtractError> {
            Ok(self.0.clone())
        }
    }

    struct StubOcr {
        headings: Vec<Heading>,
        called: Cell<bool>,
    }

    impl StubOcr {
        fn new(headings: Vec<Heading>) -> Self {
            Self {
                headings,
                called: Cell::new(false),
            }
        }
    }

    impl OcrTrack for StubOcr {
        fn extract_headings(&self, _pdf_path: &Path) -> Result<Vec<Heading>, ExtractError> {
            self.called.set(true);
            Ok(self.headings.clone())
        }
    }

    fn layout_headings(count: usize) -> Vec<Heading> {
        (0..count)
            .map(|i| heading(HeadingLevel::H2, &format!("Section {}", i + 1), i as u32 + 1))
            .collect()
    }

    #[test]
    fn four_layout_headings_trigger_the_ocr_pass() {
        let layout = StubLayout(layout_headings(4));
        let ocr = StubOcr::new(vec![heading(HeadingLevel::H3, "Scanned Notes", 9)]);

        let outline = assemble(Path::new("doc.pdf"), &layout, &ocr).unwrap();

        assert!(ocr.called.get());
        assert_eq!(outline.outline.len(), 5);
        assert_eq!(outline.outline[4].text, "Scanned Notes");
    }

    #[test]
    fn five_layout_headings_skip_the_ocr_pass() {
        let layout = StubLayout(layout_headings(5));
        let ocr = StubOcr::new(vec![heading(HeadingLevel::H3, "Scanned Notes", 9)]);

        let outline = assemble(Path::new("doc.pdf"), &layout, &ocr).unwrap();

        assert!(!ocr.called.get());
        assert_eq!(outline.outline.len(), 5);
    }

    #[test]
    fn merged_headings_are_page_sorted_with_stable_same_page_order() {
        let layout = StubLayout(vec![
            heading(HeadingLevel::H1, "Late Chapter", 3),
            heading(HeadingLevel::H2, "Early Section", 1),
            heading(HeadingLevel::H3, "Late Detail", 3),
        ]);
        let ocr = StubOcr::new(vec![
            heading(HeadingLevel::H3, "Ocr Early", 1),
            heading(HeadingLevel::H2, "Ocr Late", 3),
        ]);

        let outline = assemble(Path::new("doc.pdf"), &layout, &ocr).unwrap();

        let order: Vec<(&str, u32)> = outline
            .outline
            .iter()
            .map(|h| (h.text.as_str(), h.page))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Early Section", 1),
                ("Ocr Early", 1),
                ("Late Chapter", 3),
                ("Late Detail", 3),
                ("Ocr Late", 3),
            ]
        );
    }

    #[test]
    fn no_deduplication_across_passes() {
        let layout = StubLayout(vec![heading(HeadingLevel::H2, "Overview", 1)]);
        let ocr = StubOcr::new(vec![heading(HeadingLevel::H2, "Overview", 1)]);

        let outline = assemble(Path::new("doc.pdf"), &layout, &ocr).unwrap();
        assert_eq!(outline.outline.len(), 2);
    }

    #[test]
    fn ocr_failure_propagates_to_the_caller() {
        struct FailingOcr;
        impl OcrTrack for FailingOcr {
            fn extract_headings(&self, pdf_path: &Path) -> Result<Vec<Heading>, ExtractError> {
                Err(ExtractError::OcrEngine {
                    image: pdf_path.to_path_buf(),
                    reason: "engine unavailable".to_string(),
                })
            }
        }

        let layout = StubLayout(layout_headings(2));
        let result = assemble(Path::new("doc.pdf"), &layout, &FailingOcr);
        assert!(matches!(result, Err(ExtractError::OcrEngine { .. })));
    }

    #[test]
    fn title_comes_from_the_filename() {
        let layout = StubLayout(layout_headings(5));
        let ocr = StubOcr::new(Vec::new());

        let outline =
            assemble(Path::new("input/annual_report_2023.pdf"), &layout, &ocr).unwrap();
        assert_eq!(outline.title, "annual report 2023");
    }

    #[test]
    fn assembly_is_idempotent() {
        let layout = StubLayout(vec![
            heading(HeadingLevel::H1, "Alpha", 2),
            heading(HeadingLevel::H3, "Beta", 1),
        ]);
        let ocr = StubOcr::new(vec![heading(HeadingLevel::H3, "Gamma", 2)]);

        let first = assemble(Path::new("doc.pdf"), &layout, &ocr).unwrap();
        let second = assemble(Path::new("doc.pdf"), &layout, &ocr).unwrap();
        assert_eq!(first, second);
    }
}
