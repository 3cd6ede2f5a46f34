//! Permanent address block and its composite form.

use serde::{Deserialize, Serialize};

/// Delimiter between components of the composite address.
pub const ADDRESS_DELIMITER: &str = ", ";

/// Address components in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Division,
    District,
    Upozila,
    UnionWard,
    Mouza,
    VillageRoad,
    PostOffice,
    PostalCode,
    Region,
}

impl AddressField {
    /// All components in canonical order.
    pub const ALL: [AddressField; 9] = [
        AddressField::Division,
        AddressField::District,
        AddressField::Upozila,
        AddressField::UnionWard,
        AddressField::Mouza,
        AddressField::VillageRoad,
        AddressField::PostOffice,
        AddressField::PostalCode,
        AddressField::Region,
    ];

    /// Key used for this component inside `Permanent_Address`.
    pub fn key(self) -> &'static str {
        match self {
            AddressField::Division => "Division",
            AddressField::District => "District",
            AddressField::Upozila => "Upozila",
            AddressField::UnionWard => "Union_Ward",
            AddressField::Mouza => "Mouza",
            AddressField::VillageRoad => "Village_Road",
            AddressField::PostOffice => "Post_Office",
            AddressField::PostalCode => "Postal_Code",
            AddressField::Region => "Region",
        }
    }
}

/// The `Permanent_Address` object. All nine keys are always serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(rename = "Division")]
    pub division: Option<String>,

    #[serde(rename = "District")]
    pub district: Option<String>,

    #[serde(rename = "Upozila")]
    pub upozila: Option<String>,

    #[serde(rename = "Union_Ward")]
    pub union_ward: Option<String>,

    #[serde(rename = "Mouza")]
    pub mouza: Option<String>,

    #[serde(rename = "Village_Road")]
    pub village_road: Option<String>,

    #[serde(rename = "Post_Office")]
    pub post_office: Option<String>,

    #[serde(rename = "Postal_Code")]
    pub postal_code: Option<String>,

    #[serde(rename = "Region")]
    pub region: Option<String>,
}

impl AddressRecord {
    /// Get the value of a component.
    pub fn get(&self, field: AddressField) -> Option<&str> {
        let value = match field {
            AddressField::Division => &self.division,
            AddressField::District => &self.district,
            AddressField::Upozila => &self.upozila,
            AddressField::UnionWard => &self.union_ward,
            AddressField::Mouza => &self.mouza,
            AddressField::VillageRoad => &self.village_road,
            AddressField::PostOffice => &self.post_office,
            AddressField::PostalCode => &self.postal_code,
            AddressField::Region => &self.region,
        };
        value.as_deref()
    }

    /// Mutable slot for a component.
    pub fn slot_mut(&mut self, field: AddressField) -> &mut Option<String> {
        match field {
            AddressField::Division => &mut self.division,
            AddressField::District => &mut self.district,
            AddressField::Upozila => &mut self.upozila,
            AddressField::UnionWard => &mut self.union_ward,
            AddressField::Mouza => &mut self.mouza,
            AddressField::VillageRoad => &mut self.village_road,
            AddressField::PostOffice => &mut self.post_office,
            AddressField::PostalCode => &mut self.postal_code,
            AddressField::Region => &mut self.region,
        }
    }

    /// Join all present components in canonical order.
    ///
    /// Empty components are skipped; with nothing present this is `""`.
    pub fn composite(&self) -> String {
        AddressField::ALL
            .iter()
            .filter_map(|f| self.get(*f))
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(ADDRESS_DELIMITER)
    }

    /// Whether no component was resolved.
    pub fn is_empty(&self) -> bool {
        AddressField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}
