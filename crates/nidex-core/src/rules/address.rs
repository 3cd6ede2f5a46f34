//! Permanent address resolution.

use tracing::{debug, trace};

use super::patterns::{ADDRESS_PATTERNS, DIVISION_LABEL};
use super::{match_rules, normalize, ExtractedText, FieldExtractor};
use crate::models::AddressRecord;

/// Resolves the permanent address block.
///
/// Division is looked up line by line: the value sits either after a `:` on
/// the label line or alone on the following line. The other components use
/// the address label table against the whole text.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressResolver;

impl AddressResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the division from the text lines.
    ///
    /// Only the first label line is considered.
    pub fn resolve_division(&self, lines: &[&str]) -> Option<String> {
        let (index, line) = lines
            .iter()
            .enumerate()
            .find(|(_, line)| DIVISION_LABEL.is_match(line))?;

        match line.split(':').nth(1).and_then(normalize) {
            Some(inline) => {
                trace!("division inline on line {}", index + 1);
                Some(inline)
            }
            None => {
                trace!("division taken from line {}", index + 2);
                lines.get(index + 1).and_then(|next| normalize(next))
            }
        }
    }
}

impl FieldExtractor for AddressResolver {
    type Output = AddressRecord;

    fn extract(&self, text: &ExtractedText<'_>) -> AddressRecord {
        let mut record = AddressRecord {
            division: self.resolve_division(text.lines()),
            ..Default::default()
        };

        for (field, value) in match_rules(text.text(), &ADDRESS_PATTERNS) {
            *record.slot_mut(field) = value;
        }

        debug!("Resolved address: {:?}", record.composite());
        record
    }
}

/// Resolve the permanent address from text.
pub fn extract_address(text: &str) -> AddressRecord {
    AddressResolver::new().extract(&ExtractedText::new(text))
}
