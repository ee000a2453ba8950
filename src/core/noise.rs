use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of a heading candidate. Longer lines are body text.
pub const MAX_CANDIDATE_LEN: usize = 200;

/// Ordered exclusion rules applied to every candidate before classification.
/// First match wins; a matching candidate is discarded unconditionally,
/// regardless of font size or heading shape.
static NOISE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // ISO-style dates like 2000-01-01
        r"^\d{4}-\d{2}-\d{1,2}$",
        // Filenames with known document/data extensions
        r"^[-\w]+\.(pdf|dat|bmk|mdf|ifd)$",
        // Command-flag-like tokens such as -abmk or --verbose
        r"^--?[A-Za-z][\w-]*",
        // All-caps technical strings like TRANS_DATE=1,A
        r"^[A-Z0-9_=,]+$",
        // key=value technical strings with lowercase keys, e.g. trans_date=1,A
        r"^\w+=[\w,]+$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("noise pattern must compile"))
    .collect()
});

pub fn is_noise(text: &str) -> bool {
    NOISE_PATTERNS.iter().any(|rule| rule.is_match(text))
}

/// Shared candidate gate for both extractors: trim, drop empty or over-long
/// lines, drop noise. Returns the trimmed text when the candidate survives.
pub fn clean_candidate(raw: &str) -> Option<&str> {
    let text = raw.trim();
    if text.is_empty() || text.chars().count() > MAX_CANDIDATE_LEN {
        return None;
    }
    if is_noise(text) {
        return None;
    }
    Some(text)
}
