//! Rule-based field extraction for national ID documents.

pub mod address;
pub mod patterns;
pub mod person;

pub use address::AddressResolver;
pub use patterns::{Capture, CompiledRule, FieldRule, ADDRESS_RULES, PERSON_RULES};
pub use person::FieldMatcher;

/// Mojibake left behind when UTF-8 replacement characters are decoded as Latin-1.
pub const MOJIBAKE: &str = "ï¿½";

/// The Unicode replacement character itself.
pub const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Document text as one blob plus its lines.
#[derive(Debug, Clone)]
pub struct ExtractedText<'a> {
    text: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> ExtractedText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: text.lines().collect(),
        }
    }

    /// The full text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Lines in document order.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }
}

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The record this extractor produces.
    type Output;

    /// Extract the record from document text.
    fn extract(&self, text: &ExtractedText<'_>) -> Self::Output;
}

/// Clean a captured value.
///
/// Mojibake and replacement characters are removed, then surrounding
/// whitespace is trimmed. A value that cleans to nothing is `None`.
pub fn normalize(raw: &str) -> Option<String> {
    let cleaned = raw.replace(MOJIBAKE, "").replace(REPLACEMENT_CHAR, "");
    let trimmed = cleaned.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Run a compiled label table against the text.
///
/// Yields every field of the table with the first satisfying capture,
/// normalized, or `None`.
pub fn match_rules<'r, F: Copy>(
    text: &'r str,
    rules: &'r [CompiledRule<F>],
) -> impl Iterator<Item = (F, Option<String>)> + 'r {
    rules.iter().map(move |rule| {
        let value = rule
            .regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| normalize(m.as_str()));
        (rule.field, value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize("  Dhaka \t"), Some("Dhaka".to_string()));
    }

    #[test]
    fn test_normalize_strips_mojibake() {
        assert_eq!(normalize("Rahimï¿½ Uddin"), Some("Rahim Uddin".to_string()));
        assert_eq!(normalize("Rahim \u{FFFD}"), Some("Rahim".to_string()));
        assert_eq!(normalize("ï¿½ï¿½"), None);
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize("   "), None);
    }

    #[test]
    fn test_extracted_text_lines() {
        let text = ExtractedText::new("a\r\nb\nc");
        assert_eq!(text.lines(), &["a", "b", "c"]);
        assert_eq!(text.text(), "a\r\nb\nc");
    }
}
