//! Personal identity fields extracted from a national ID document.

use serde::{Deserialize, Serialize};

/// Names of the personal fields, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    NationalId,
    Pin,
    NameBangla,
    NameEnglish,
    DateOfBirth,
    BirthPlace,
    FatherName,
    MotherName,
    SpouseName,
    Religion,
    BloodGroup,
    Gender,
    MaritalStatus,
    Occupation,
    Education,
}

impl PersonField {
    /// All fields in output order.
    pub const ALL: [PersonField; 15] = [
        PersonField::NationalId,
        PersonField::Pin,
        PersonField::NameBangla,
        PersonField::NameEnglish,
        PersonField::DateOfBirth,
        PersonField::BirthPlace,
        PersonField::FatherName,
        PersonField::MotherName,
        PersonField::SpouseName,
        PersonField::Religion,
        PersonField::BloodGroup,
        PersonField::Gender,
        PersonField::MaritalStatus,
        PersonField::Occupation,
        PersonField::Education,
    ];

    /// Key used for this field in the JSON response.
    pub fn key(self) -> &'static str {
        match self {
            PersonField::NationalId => "National_ID",
            PersonField::Pin => "Pin",
            PersonField::NameBangla => "Name_Bangla",
            PersonField::NameEnglish => "Name_English",
            PersonField::DateOfBirth => "Date_of_Birth",
            PersonField::BirthPlace => "Birth_Place",
            PersonField::FatherName => "Father_Name",
            PersonField::MotherName => "Mother_Name",
            PersonField::SpouseName => "Spouse_Name",
            PersonField::Religion => "Religion",
            PersonField::BloodGroup => "blood",
            PersonField::Gender => "Gender",
            PersonField::MaritalStatus => "Marital_Status",
            PersonField::Occupation => "Occupation",
            PersonField::Education => "Education",
        }
    }
}

/// Identity section of the extraction result.
///
/// Every field is independently optional; `None` serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(rename = "National_ID")]
    pub national_id: Option<String>,

    #[serde(rename = "Pin")]
    pub pin: Option<String>,

    #[serde(rename = "Name_Bangla")]
    pub name_bangla: Option<String>,

    #[serde(rename = "Name_English")]
    pub name_english: Option<String>,

    #[serde(rename = "Date_of_Birth")]
    pub date_of_birth: Option<String>,

    #[serde(rename = "Birth_Place")]
    pub birth_place: Option<String>,

    #[serde(rename = "Father_Name")]
    pub father_name: Option<String>,

    #[serde(rename = "Mother_Name")]
    pub mother_name: Option<String>,

    #[serde(rename = "Spouse_Name")]
    pub spouse_name: Option<String>,

    #[serde(rename = "Religion")]
    pub religion: Option<String>,

    #[serde(rename = "blood")]
    pub blood_group: Option<String>,

    #[serde(rename = "Gender")]
    pub gender: Option<String>,

    #[serde(rename = "Marital_Status")]
    pub marital_status: Option<String>,

    #[serde(rename = "Occupation")]
    pub occupation: Option<String>,

    #[serde(rename = "Education")]
    pub education: Option<String>,
}

impl PersonRecord {
    /// Get the value of a field.
    pub fn get(&self, field: PersonField) -> Option<&str> {
        let value = match field {
            PersonField::NationalId => &self.national_id,
            PersonField::Pin => &self.pin,
            PersonField::NameBangla => &self.name_bangla,
            PersonField::NameEnglish => &self.name_english,
            PersonField::DateOfBirth => &self.date_of_birth,
            PersonField::BirthPlace => &self.birth_place,
            PersonField::FatherName => &self.father_name,
            PersonField::MotherName => &self.mother_name,
            PersonField::SpouseName => &self.spouse_name,
            PersonField::Religion => &self.religion,
            PersonField::BloodGroup => &self.blood_group,
            PersonField::Gender => &self.gender,
            PersonField::MaritalStatus => &self.marital_status,
            PersonField::Occupation => &self.occupation,
            PersonField::Education => &self.education,
        };
        value.as_deref()
    }

    /// Mutable slot for a field.
    pub fn slot_mut(&mut self, field: PersonField) -> &mut Option<String> {
        match field {
            PersonField::NationalId => &mut self.national_id,
            PersonField::Pin => &mut self.pin,
            PersonField::NameBangla => &mut self.name_bangla,
            PersonField::NameEnglish => &mut self.name_english,
            PersonField::DateOfBirth => &mut self.date_of_birth,
            PersonField::BirthPlace => &mut self.birth_place,
            PersonField::FatherName => &mut self.father_name,
            PersonField::MotherName => &mut self.mother_name,
            PersonField::SpouseName => &mut self.spouse_name,
            PersonField::Religion => &mut self.religion,
            PersonField::BloodGroup => &mut self.blood_group,
            PersonField::Gender => &mut self.gender,
            PersonField::MaritalStatus => &mut self.marital_status,
            PersonField::Occupation => &mut self.occupation,
            PersonField::Education => &mut self.education,
        }
    }

    /// Number of fields that were matched.
    pub fn matched_count(&self) -> usize {
        PersonField::ALL
            .iter()
            .filter(|f| self.get(**f).is_some())
            .count()
    }
}
