//! # Domain models for birth records
//!
//! Defines the data structures exchanged with a [`crate::RecordBackend`]. These
//! types are `Serialize + Deserialize` so they can cross the server/client
//! boundary via Dioxus server functions.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`ChildId`] | Backend-assigned identifier of a record. |
//! | [`Gender`] | One of `Male`, `Female`, `Other`. Parses from and displays as those exact words. |
//! | [`BirthPlace`] | The four-level location: province, district, sector, cell. Displays as `"province, district, sector, cell"`. |
//! | [`ChildFields`] | Everything a registrar submits for a child; the payload of create and update. |
//! | [`ChildRecord`] | A stored record: a [`ChildId`] plus its [`ChildFields`]. |
//! | [`Principal`] | Identifier of the authenticated user, as reported by the identity client. |

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a birth record, assigned by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildId(pub u64);

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = crate::FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            _ => Err(crate::FormError::InvalidGender),
        }
    }
}

/// Where a child was born, from the widest administrative level down.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BirthPlace {
    pub province: String,
    pub district: String,
    pub sector: String,
    pub cell: String,
}

impl fmt::Display for BirthPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.province, self.district, self.sector, self.cell
        )
    }
}

/// The full field set of a birth record, without its identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChildFields {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub mother_name: String,
    pub father_name: String,
    /// Birth weight in kilograms.
    pub weight: f64,
    pub birth_place: BirthPlace,
    pub birth_date: NaiveDate,
}

/// A birth record as stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChildRecord {
    pub id: ChildId,
    #[serde(flatten)]
    pub fields: ChildFields,
}

impl ChildRecord {
    pub fn new(id: ChildId, fields: ChildFields) -> Self {
        Self { id, fields }
    }

    /// "First Last", used in confirmation prompts and logs.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fields.first_name, self.fields.last_name)
    }
}

/// An authenticated user: the provider-assigned id plus an optional
/// human-readable name for display.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    id: String,
    display_name: Option<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Name shown in the navbar, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn fields(first_name: &str) -> ChildFields {
        ChildFields {
            first_name: first_name.to_string(),
            last_name: "Uwase".to_string(),
            gender: Gender::Female,
            mother_name: "Mukamana".to_string(),
            father_name: "Habimana".to_string(),
            weight: 3.2,
            birth_place: BirthPlace {
                province: "Kigali".to_string(),
                district: "Gasabo".to_string(),
                sector: "Remera".to_string(),
                cell: "Rukiri".to_string(),
            },
            birth_date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse_and_display() {
        for gender in Gender::ALL {
            assert_eq!(gender.to_string().parse::<Gender>().unwrap(), gender);
        }
        assert!("male".parse::<Gender>().is_err());
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn test_birth_place_display() {
        let record = ChildRecord::new(ChildId(1), fixtures::fields("Aline"));
        assert_eq!(
            record.fields.birth_place.to_string(),
            "Kigali, Gasabo, Remera, Rukiri"
        );
        assert_eq!(record.full_name(), "Aline Uwase");
    }

    #[test]
    fn test_principal_display_name_falls_back_to_id() {
        let principal = Principal::new("7f3a");
        assert_eq!(principal.display_name(), "7f3a");

        let principal = principal.with_display_name("Registrar");
        assert_eq!(principal.display_name(), "Registrar");
        assert_eq!(principal.to_string(), "7f3a");
        assert_eq!(principal.as_str(), "7f3a");
    }
}
