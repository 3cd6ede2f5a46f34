//! Label tables for national ID field extraction.
//!
//! Each table row is `(field, label, capture)`. A row compiles to
//! `<escaped label>\s+<capture>`, searched against the whole text blob.
//! Person and address rules live in separate tables so the two namespaces
//! never share a slot.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{AddressField, PersonField};

/// What counts as a value after a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Everything up to the line terminator.
    Line,
    /// A digit run of at least `min_len` digits.
    Digits { min_len: usize },
    /// Digits and dashes, as in `1990-01-31`.
    DateChars,
}

impl Capture {
    fn pattern(self) -> String {
        match self {
            Capture::Line => r"(.+)".to_string(),
            Capture::Digits { min_len } => format!(r"(\d{{{min_len},}})"),
            Capture::DateChars => r"([\d-]+)".to_string(),
        }
    }
}

/// One row of a label table.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule<F> {
    pub field: F,
    pub label: &'static str,
    pub capture: Capture,
}

impl<F: Copy> FieldRule<F> {
    pub const fn new(field: F, label: &'static str, capture: Capture) -> Self {
        Self { field, label, capture }
    }

    /// Regex source for this rule.
    pub fn pattern(&self) -> String {
        format!(r"{}\s+{}", regex::escape(self.label), self.capture.pattern())
    }

    fn compile(&self) -> CompiledRule<F> {
        CompiledRule {
            field: self.field,
            regex: Regex::new(&self.pattern()).unwrap(),
        }
    }
}

/// A rule with its regex compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule<F> {
    pub field: F,
    pub regex: Regex,
}

/// Minimum digits in a national ID number.
pub const NATIONAL_ID_MIN_DIGITS: usize = 10;

/// Minimum digits in a PIN.
pub const PIN_MIN_DIGITS: usize = 14;

pub const PERSON_RULES: [FieldRule<PersonField>; 15] = [
    FieldRule::new(PersonField::NationalId, "National ID", Capture::Digits { min_len: NATIONAL_ID_MIN_DIGITS }),
    FieldRule::new(PersonField::Pin, "Pin", Capture::Digits { min_len: PIN_MIN_DIGITS }),
    FieldRule::new(PersonField::NameBangla, "Name(Bangla)", Capture::Line),
    FieldRule::new(PersonField::NameEnglish, "Name(English)", Capture::Line),
    FieldRule::new(PersonField::DateOfBirth, "Date of Birth", Capture::DateChars),
    FieldRule::new(PersonField::BirthPlace, "Birth Place", Capture::Line),
    FieldRule::new(PersonField::FatherName, "Father Name", Capture::Line),
    FieldRule::new(PersonField::MotherName, "Mother Name", Capture::Line),
    FieldRule::new(PersonField::SpouseName, "Spouse Name", Capture::Line),
    FieldRule::new(PersonField::Religion, "Religion", Capture::Line),
    FieldRule::new(PersonField::BloodGroup, "Blood Group", Capture::Line),
    FieldRule::new(PersonField::Gender, "Gender", Capture::Line),
    FieldRule::new(PersonField::MaritalStatus, "Marital", Capture::Line),
    FieldRule::new(PersonField::Occupation, "Occupation", Capture::Line),
    FieldRule::new(PersonField::Education, "Education", Capture::Line),
];

/// Address components resolved by label. Division is resolved separately.
pub const ADDRESS_RULES: [FieldRule<AddressField>; 8] = [
    FieldRule::new(AddressField::District, "District", Capture::Line),
    FieldRule::new(AddressField::Upozila, "Upozila", Capture::Line),
    FieldRule::new(AddressField::UnionWard, "Union/Ward", Capture::Line),
    FieldRule::new(AddressField::Mouza, "Mouza/Moholla", Capture::Line),
    FieldRule::new(AddressField::VillageRoad, "Village/Road", Capture::Line),
    FieldRule::new(AddressField::PostOffice, "Post Office", Capture::Line),
    FieldRule::new(AddressField::PostalCode, "Postal Code", Capture::Digits { min_len: 1 }),
    FieldRule::new(AddressField::Region, "Region", Capture::Line),
];

fn compile_rules<F: Copy>(rules: &[FieldRule<F>]) -> Vec<CompiledRule<F>> {
    rules.iter().map(FieldRule::compile).collect()
}

lazy_static! {
    pub static ref PERSON_PATTERNS: Vec<CompiledRule<PersonField>> = compile_rules(&PERSON_RULES);

    pub static ref ADDRESS_PATTERNS: Vec<CompiledRule<AddressField>> = compile_rules(&ADDRESS_RULES);

    // Division header line, e.g. "Permanent Address Division: Dhaka"
    pub static ref DIVISION_LABEL: Regex = Regex::new(
        r"(?i)Permanent Address\s*Division"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_patterns() {
        assert_eq!(PERSON_RULES[0].pattern(), r"National ID\s+(\d{10,})");
        assert_eq!(PERSON_RULES[2].pattern(), r"Name\(Bangla\)\s+(.+)");
        assert_eq!(PERSON_RULES[4].pattern(), r"Date of Birth\s+([\d-]+)");
        assert_eq!(ADDRESS_RULES[6].pattern(), r"Postal Code\s+(\d{1,})");
    }

    #[test]
    fn test_tables_compile() {
        assert_eq!(PERSON_PATTERNS.len(), PersonField::ALL.len());
        assert_eq!(ADDRESS_PATTERNS.len(), AddressField::ALL.len() - 1);
    }

    #[test]
    fn test_one_rule_per_field() {
        for field in PersonField::ALL {
            assert_eq!(PERSON_RULES.iter().filter(|r| r.field == field).count(), 1);
        }
        assert!(!ADDRESS_RULES.iter().any(|r| r.field == AddressField::Division));
    }

    #[test]
    fn test_division_label_case_insensitive() {
        assert!(DIVISION_LABEL.is_match("PERMANENT ADDRESS DIVISION"));
        assert!(DIVISION_LABEL.is_match("Permanent AddressDivision: Dhaka"));
        assert!(!DIVISION_LABEL.is_match("Present Address Division"));
    }
}
