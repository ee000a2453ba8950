use std::path::Path;

use crate::core::error::ExtractError;
use crate::core::model::{Heading, HeadingLevel};
use crate::core::noise::clean_candidate;
use crate::layout::pdf_reader::PdfReader;
use crate::layout::text_extractor::{extract_page_lines, TextLine};
use crate::layout::LayoutTrack;

/// Classifies reconstructed text lines by average character font size.
#[derive(Debug, Default)]
pub struct LayoutExtractor;

impl LayoutExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutTrack for LayoutExtractor {
    fn extract_headings(&self, pdf_path: &Path) -> Result<Vec<Heading>, ExtractError> {
        let reader = PdfReader::open(pdf_path)?;
        let mut headings = Vec::new();
        for (page_number, page_id) in reader.pages() {
            for line in extract_page_lines(reader.document(), page_id) {
                if let Some(heading) = classify_line(&line, page_number) {
                    headings.push(heading);
                }
            }
        }
        Ok(headings)
    }
}

/// Font-size decision ladder. Text below heading size produces nothing.
pub(crate) fn level_for_size(avg_size: f32) -> Option<HeadingLevel> {
    if avg_size >= 18.0 {
        Some(HeadingLevel::H1)
    } else if avg_size >= 14.0 {
        Some(HeadingLevel::H2)
    } else if avg_size >= 12.0 {
        Some(HeadingLevel::H3)
    } else {
        None
    }
}

pub(crate) fn classify_line(line: &TextLine, page: u32) -> Option<Heading> {
    let text = line.text();
    let text = clean_candidate(&text)?;
    let level = level_for_size(line.avg_char_size())?;
    Some(Heading {
        level,
        text: text.to_string(),
        page,
    })
}
