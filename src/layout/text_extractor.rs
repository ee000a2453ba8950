use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};

/// A run of characters sharing one font size. Size 0 means the content
/// stream never set a size before the text was shown.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub size: f32,
}

/// One reconstructed text line: the runs between two line-break operators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLine {
    pub runs: Vec<TextRun>,
}

impl TextLine {
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Average font size over all size-bearing, non-whitespace characters.
    /// 0 when the line carries no sized characters.
    pub fn avg_char_size(&self) -> f32 {
        let mut total = 0.0f32;
        let mut count = 0usize;
        for run in &self.runs {
            if run.size <= 0.0 {
                continue;
            }
            let chars = run.text.chars().filter(|c| !c.is_whitespace()).count();
            total += run.size * chars as f32;
            count += chars;
        }
        if count == 0 {
            0.0
        } else {
            total / count as f32
        }
    }
}

/// Reconstructs text lines from one page's content stream. A page whose
/// content cannot be fetched or decoded yields no lines; extraction never
/// aborts on a malformed page.
pub fn extract_page_lines(document: &Document, page_id: ObjectId) -> Vec<TextLine> {
    let content = match document.get_page_content(page_id) {
        Ok(content) => content,
        Err(_) => return Vec::new(),
    };
    let operations = match Content::decode(&content) {
        Ok(content) => content.operations,
        Err(_) => return Vec::new(),
    };

    let mut builder = LineBuilder::default();
    for op in operations {
        match op.operator.as_str() {
            // Tf sets the font and size; a size change starts a new run.
            "Tf" => {
                if let Some(size) = op.operands.get(1).and_then(operand_to_f32) {
                    builder.set_size(size);
                }
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    builder.append(bytes);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    for item in items {
                        if let Object::String(bytes, _) = item {
                            builder.append(bytes);
                        }
                    }
                }
            }
            // ' and " move to the next line and then show text.
            "'" => {
                builder.break_line();
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    builder.append(bytes);
                }
            }
            "\"" => {
                builder.break_line();
                if let Some(Object::String(bytes, _)) = op.operands.get(2) {
                    builder.append(bytes);
                }
            }
            "Td" | "TD" | "T*" | "BT" | "ET" => builder.break_line(),
            _ => {}
        }
    }
    builder.finish()
}

#[derive(Debug, Default)]
struct LineBuilder {
    lines: Vec<TextLine>,
    runs: Vec<TextRun>,
    pending: String,
    size: f32,
}

impl LineBuilder {
    fn set_size(&mut self, size: f32) {
        if size != self.size {
            self.flush_run();
            self.size = size;
        }
    }

    fn append(&mut self, bytes: &[u8]) {
        if let Some(text) = decode_text_bytes(bytes) {
            self.pending.push_str(&text);
        }
    }

    fn flush_run(&mut self) {
        if !self.pending.is_empty() {
            self.runs.push(TextRun {
                text: std::mem::take(&mut self.pending),
                size: self.size,
            });
        }
    }

    fn break_line(&mut self) {
        self.flush_run();
        if !self.runs.is_empty() {
            self.lines.push(TextLine {
                runs: std::mem::take(&mut self.runs),
            });
        }
    }

    fn finish(mut self) -> Vec<TextLine> {
        self.break_line();
        self.lines
    }
}

fn operand_to_f32(object: &Object) -> Option<f32> {
    match object {
        Object::Real(value) => Some(*value as f32),
        Object::Integer(value) => Some(*value as f32),
        _ => None,
    }
}

/// Decodes PDF string bytes: UTF-16BE with BOM, UTF-8, or Latin-1 fallback.
/// An operand that cannot be decoded to printable text is skipped.
fn decode_text_bytes(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }

    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16(&units).ok().and_then(strip_controls);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return strip_controls(text.to_string());
    }

    strip_controls(bytes.iter().map(|&b| b as char).collect())
}

fn strip_controls(text: String) -> Option<String> {
    let cleaned: String = text.chars().filter(|c| !c.is_control()).collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
