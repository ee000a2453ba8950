use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::TempDir;

use crate::core::error::ExtractError;
use crate::core::model::{Heading, HeadingLevel};
use crate::core::noise::clean_candidate;
use crate::ocr::engine::TesseractEngine;
use crate::ocr::renderer::PageRenderer;
use crate::ocr::OcrTrack;

/// Uppercase start followed by 4+ characters from the heading alphabet.
/// Lines that do not look like headings at all are dropped before the
/// word-count grading.
static HEADING_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Za-z0-9 ,:\[\]()/-]{4,}$").expect("shape pattern must compile"));

/// Classifies OCR text lines by structural shape and word count.
#[derive(Debug, Clone)]
pub struct OcrExtractor {
    renderer: PageRenderer,
    engine: TesseractEngine,
}

impl OcrExtractor {
    pub fn new(dpi: u32, lang: impl Into<String>) -> Self {
        Self {
            renderer: PageRenderer::new(dpi),
            engine: TesseractEngine::new(lang),
        }
    }
}

impl OcrTrack for OcrExtractor {
    fn extract_headings(&self, pdf_path: &Path) -> Result<Vec<Heading>, ExtractError> {
        // Rendered images live only for the duration of this pass.
        let work_dir = TempDir::new()?;
        let images = self.renderer.render_all(pdf_path, work_dir.path())?;

        let mut headings = Vec::new();
        for (index, image) in images.iter().enumerate() {
            let page_number = (index + 1) as u32;
            let text = self.engine.recognize(image)?;
            for line in text.lines() {
                if let Some(heading) = classify_ocr_line(line, page_number) {
                    headings.push(heading);
                }
            }
        }
        Ok(headings)
    }
}

pub(crate) fn classify_ocr_line(raw: &str, page: u32) -> Option<Heading> {
    let text = clean_candidate(raw)?;
    if !HEADING_SHAPE.is_match(text) {
        return None;
    }
    let level = if text.split_whitespace().count() > 3 {
        HeadingLevel::H2
    } else {
        HeadingLevel::H3
    };
    Some(Heading {
        level,
        text: text.to_string(),
        page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn long_heading_becomes_h2() {
        let heading = classify_ocr_line("Annual Review of Operations", 3).unwrap();
        assert_eq!(heading.level, HeadingLevel::H2);
        assert_eq!(heading.text, "Annual Review of Operations");
        assert_eq!(heading.page, 3);
    }

    #[test]
    fn short_heading_becomes_h3() {
        let heading = classify_ocr_line("Financial Summary", 1).unwrap();
        assert_eq!(heading.level, HeadingLevel::H3);
    }

    #[test]
    fn exactly_three_words_is_h3() {
        let heading = classify_ocr_line("Scope of Work", 2).unwrap();
        assert_eq!(heading.level, HeadingLevel::H3);
    }

    #[test]
    fn never_produces_h1() {
        let samples = [
            "Chapter 1: Introduction to Distributed Systems",
            "Appendix A",
            "Results (2023) and Outlook",
        ];
        for sample in samples {
            if let Some(heading) = classify_ocr_line(sample, 1) {
                assert_ne!(heading.level, HeadingLevel::H1, "{sample}");
            }
        }
    }

    #[test]
    fn rejects_lowercase_start() {
        assert_eq!(classify_ocr_line("introduction to the topic", 1), None);
    }

    #[test]
    fn rejects_short_text() {
        assert_eq!(classify_ocr_line("Date", 1), None);
        assert!(classify_ocr_line("Dates", 1).is_some());
    }

    #[test]
    fn rejects_disallowed_characters() {
        assert_eq!(classify_ocr_line("Profit & Loss", 1), None);
        assert_eq!(classify_ocr_line("What is next?", 1), None);
    }

    #[test]
    fn rejects_noise_before_shape_check() {
        assert_eq!(classify_ocr_line("2023-01-01", 1), None);
        assert_eq!(classify_ocr_line("TRANS_DATE=1,A", 1), None);
    }

    #[test]
    fn trims_ocr_whitespace() {
        let heading = classify_ocr_line("  Quarterly Report  ", 5).unwrap();
        assert_eq!(heading.text, "Quarterly Report");
    }
}
