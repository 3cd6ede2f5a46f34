//! Identity field matching.

use tracing::trace;

use super::patterns::PERSON_PATTERNS;
use super::{match_rules, ExtractedText, FieldExtractor};
use crate::models::{PersonField, PersonRecord};

/// Matches the identity label table against document text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMatcher;

impl FieldMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Extract a single field.
    pub fn extract_field(&self, text: &str, field: PersonField) -> Option<String> {
        match_rules(text, &PERSON_PATTERNS)
            .find(|(f, _)| *f == field)
            .and_then(|(_, value)| value)
    }
}

impl FieldExtractor for FieldMatcher {
    type Output = PersonRecord;

    fn extract(&self, text: &ExtractedText<'_>) -> PersonRecord {
        let mut record = PersonRecord::default();

        for (field, value) in match_rules(text.text(), &PERSON_PATTERNS) {
            trace!("{} -> {:?}", field.key(), value);
            *record.slot_mut(field) = value;
        }

        record
    }
}

/// Extract the identity record from text.
pub fn extract_person(text: &str) -> PersonRecord {
    FieldMatcher::new().extract(&ExtractedText::new(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
National ID 1234567890
Pin 19901234567890123
Name(Bangla) মোঃ রহিম উদ্দিন
Name(English) Md. Rahim Uddin
Date of Birth 1990-01-31
Birth Place Dhaka
Father Name Md. Karim Uddin
Mother Name Mst. Rahima Begum
Spouse Name Mst. Salma Khatun
Religion Islam
Blood Group B+
Gender Male
Marital Married
Occupation Service
Education HSC
";

    #[test]
    fn test_extract_full_record() {
        let record = extract_person(SAMPLE);

        let expected = PersonRecord {
            national_id: Some("1234567890".to_string()),
            pin: Some("19901234567890123".to_string()),
            name_bangla: Some("মোঃ রহিম উদ্দিন".to_string()),
            name_english: Some("Md. Rahim Uddin".to_string()),
            date_of_birth: Some("1990-01-31".to_string()),
            birth_place: Some("Dhaka".to_string()),
            father_name: Some("Md. Karim Uddin".to_string()),
            mother_name: Some("Mst. Rahima Begum".to_string()),
            spouse_name: Some("Mst. Salma Khatun".to_string()),
            religion: Some("Islam".to_string()),
            blood_group: Some("B+".to_string()),
            gender: Some("Male".to_string()),
            marital_status: Some("Married".to_string()),
            occupation: Some("Service".to_string()),
            education: Some("HSC".to_string()),
        };

        assert_eq!(record, expected);
    }

    #[test]
    fn test_missing_labels_are_none() {
        let record = extract_person("Name(English) Jane Doe\n");

        assert_eq!(record.name_english.as_deref(), Some("Jane Doe"));
        assert_eq!(record.matched_count(), 1);
        assert_eq!(extract_person(""), PersonRecord::default());
    }

    #[test]
    fn test_national_id_min_length() {
        let matcher = FieldMatcher::new();

        assert_eq!(matcher.extract_field("National ID 123456789", PersonField::NationalId), None);
        assert_eq!(
            matcher.extract_field("National ID 1234567890", PersonField::NationalId),
            Some("1234567890".to_string())
        );
        assert_eq!(
            matcher.extract_field("National ID 1234567890123", PersonField::NationalId),
            Some("1234567890123".to_string())
        );
    }

    #[test]
    fn test_pin_min_length() {
        let matcher = FieldMatcher::new();

        assert_eq!(matcher.extract_field("Pin 1234567890123", PersonField::Pin), None);
        assert_eq!(
            matcher.extract_field("Pin 12345678901234", PersonField::Pin),
            Some("12345678901234".to_string())
        );
    }

    #[test]
    fn test_value_on_next_line() {
        // \s+ spans the line break after a bare label
        let record = extract_person("Father Name\nMd. Karim Uddin\n");
        assert_eq!(record.father_name.as_deref(), Some("Md. Karim Uddin"));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let record = extract_person("Religion Islam\nReligion Hinduism\n");
        assert_eq!(record.religion.as_deref(), Some("Islam"));
    }

    #[test]
    fn test_case_sensitive_labels() {
        let record = extract_person("religion Islam\nGENDER Male\n");
        assert_eq!(record.religion, None);
        assert_eq!(record.gender, None);
    }

    #[test]
    fn test_date_charset() {
        let record = extract_person("Date of Birth 31-01-1990 (verified)\n");
        assert_eq!(record.date_of_birth.as_deref(), Some("31-01-1990"));

        let record = extract_person("Date of Birth unknown\n");
        assert_eq!(record.date_of_birth, None);
    }

    #[test]
    fn test_mojibake_removed() {
        let record = extract_person("Name(English) Md.ï¿½ Rahim ï¿½\r\n");
        assert_eq!(record.name_english.as_deref(), Some("Md. Rahim"));
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(extract_person(SAMPLE), extract_person(SAMPLE));
    }
}
