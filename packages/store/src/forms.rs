//! # Form buffers
//!
//! [`ChildForm`] and [`ContactForm`] hold exactly what the user typed, one
//! `String` per input. They are only turned into typed values on submit:
//! [`ChildForm::parse`] trims every field, checks that nothing is missing and
//! converts gender, weight and birth date, returning [`ChildFields`] or the
//! first [`FormError`] in form order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::models::{BirthPlace, ChildFields, ChildRecord, Gender};

/// Editable buffer behind the add/edit child form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildForm {
    pub first_name: String,
    pub last_name: String,
    /// Empty until the user picks one of [`Gender::ALL`].
    pub gender: String,
    pub mother_name: String,
    pub father_name: String,
    pub weight: String,
    pub province: String,
    pub district: String,
    pub sector: String,
    pub cell: String,
    /// `YYYY-MM-DD`, the value format of a date input.
    pub birth_date: String,
}

impl ChildForm {
    /// Pre-fill the form with a record's current values.
    pub fn from_record(record: &ChildRecord) -> Self {
        let f = &record.fields;
        Self {
            first_name: f.first_name.clone(),
            last_name: f.last_name.clone(),
            gender: f.gender.to_string(),
            mother_name: f.mother_name.clone(),
            father_name: f.father_name.clone(),
            weight: f.weight.to_string(),
            province: f.birth_place.province.clone(),
            district: f.birth_place.district.clone(),
            sector: f.birth_place.sector.clone(),
            cell: f.birth_place.cell.clone(),
            birth_date: f.birth_date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Validate the buffer and convert it into the payload sent to the backend.
    pub fn parse(&self) -> Result<ChildFields, FormError> {
        let first_name = required(&self.first_name, ChildField::FirstName.label())?;
        let last_name = required(&self.last_name, ChildField::LastName.label())?;
        let gender: Gender = self.gender.trim().parse()?;
        let mother_name = required(&self.mother_name, ChildField::MotherName.label())?;
        let father_name = required(&self.father_name, ChildField::FatherName.label())?;

        let weight: f64 = required(&self.weight, ChildField::Weight.label())?
            .parse()
            .map_err(|_| FormError::InvalidWeight)?;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(FormError::InvalidWeight);
        }

        let birth_date = NaiveDate::parse_from_str(
            &required(&self.birth_date, ChildField::BirthDate.label())?,
            "%Y-%m-%d",
        )
        .map_err(|_| FormError::InvalidBirthDate)?;

        let birth_place = BirthPlace {
            province: required(&self.province, ChildField::Province.label())?,
            district: required(&self.district, ChildField::District.label())?,
            sector: required(&self.sector, ChildField::Sector.label())?,
            cell: required(&self.cell, ChildField::Cell.label())?,
        };

        Ok(ChildFields {
            first_name,
            last_name,
            gender,
            mother_name,
            father_name,
            weight,
            birth_place,
            birth_date,
        })
    }
}

/// One input of [`ChildForm`], in the order the form shows them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChildField {
    FirstName,
    LastName,
    Gender,
    MotherName,
    FatherName,
    Weight,
    BirthDate,
    Province,
    District,
    Sector,
    Cell,
}

impl ChildField {
    pub const ALL: [ChildField; 11] = [
        ChildField::FirstName,
        ChildField::LastName,
        ChildField::Gender,
        ChildField::MotherName,
        ChildField::FatherName,
        ChildField::Weight,
        ChildField::BirthDate,
        ChildField::Province,
        ChildField::District,
        ChildField::Sector,
        ChildField::Cell,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChildField::FirstName => "First Name",
            ChildField::LastName => "Last Name",
            ChildField::Gender => "Gender",
            ChildField::MotherName => "Mother's Name",
            ChildField::FatherName => "Father's Name",
            ChildField::Weight => "Weight (kg)",
            ChildField::BirthDate => "Birth Date",
            ChildField::Province => ChildField::Province.label(),
            ChildField::District => ChildField::District.label(),
            ChildField::Sector => ChildField::Sector.label(),
            ChildField::Cell => "Cell",
        }
    }

    /// HTML input type; gender is rendered as a select instead.
    pub fn input_type(self) -> &'static str {
        match self {
            ChildField::Weight => "number",
            ChildField::BirthDate => "date",
            _ => "text",
        }
    }
}

impl ChildForm {
    pub fn get(&self, field: ChildField) -> &str {
        match field {
            ChildField::FirstName => &self.first_name,
            ChildField::LastName => &self.last_name,
            ChildField::Gender => &self.gender,
            ChildField::MotherName => &self.mother_name,
            ChildField::FatherName => &self.father_name,
            ChildField::Weight => &self.weight,
            ChildField::BirthDate => &self.birth_date,
            ChildField::Province => &self.province,
            ChildField::District => &self.district,
            ChildField::Sector => &self.sector,
            ChildField::Cell => &self.cell,
        }
    }

    pub fn set(&mut self, field: ChildField, value: String) {
        let slot = match field {
            ChildField::FirstName => &mut self.first_name,
            ChildField::LastName => &mut self.last_name,
            ChildField::Gender => &mut self.gender,
            ChildField::MotherName => &mut self.mother_name,
            ChildField::FatherName => &mut self.father_name,
            ChildField::Weight => &mut self.weight,
            ChildField::BirthDate => &mut self.birth_date,
            ChildField::Province => &mut self.province,
            ChildField::District => &mut self.district,
            ChildField::Sector => &mut self.sector,
            ChildField::Cell => &mut self.cell,
        };
        *slot = value;
    }
}

/// Buffer behind the "Contact Us" form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), FormError> {
        required(&self.name, "Name")?;
        let email = required(&self.email, "Email")?;
        if !email.contains('@') {
            return Err(FormError::InvalidEmail);
        }
        required(&self.message, "Message")?;
        Ok(())
    }
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fixtures, ChildId};

    fn filled() -> ChildForm {
        ChildForm::from_record(&ChildRecord::new(ChildId(3), fixtures::fields("Aline")))
    }

    #[test]
    fn test_from_record_prefills_every_field() {
        let form = filled();
        assert_eq!(form.first_name, "Aline");
        assert_eq!(form.gender, "Female");
        assert_eq!(form.weight, "3.2");
        assert_eq!(form.cell, "Rukiri");
        assert_eq!(form.birth_date, "2024-03-14");
        assert_eq!(form.parse().unwrap(), fixtures::fields("Aline"));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let mut form = filled();
        form.first_name = "  Aline ".to_string();
        form.weight = " 3.2 ".to_string();
        assert_eq!(form.parse().unwrap(), fixtures::fields("Aline"));
    }

    #[test]
    fn test_parse_reports_first_missing_field() {
        let mut form = filled();
        form.last_name.clear();
        form.cell.clear();
        assert_eq!(form.parse(), Err(FormError::Missing("Last Name")));

        assert_eq!(
            ChildForm::default().parse(),
            Err(FormError::Missing("First Name"))
        );
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        let mut form = filled();
        form.gender.clear();
        assert_eq!(form.parse(), Err(FormError::InvalidGender));

        let mut form = filled();
        form.weight = "heavy".to_string();
        assert_eq!(form.parse(), Err(FormError::InvalidWeight));
        form.weight = "-1".to_string();
        assert_eq!(form.parse(), Err(FormError::InvalidWeight));

        let mut form = filled();
        form.birth_date = "14/03/2024".to_string();
        assert_eq!(form.parse(), Err(FormError::InvalidBirthDate));
    }

    #[test]
    fn test_contact_validation() {
        let mut form = ContactForm {
            name: "Jean".to_string(),
            email: "jean@example.org".to_string(),
            message: "Hello".to_string(),
        };
        assert!(form.validate().is_ok());

        form.email = "jean".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidEmail));

        form.email = "jean@example.org".to_string();
        form.message = "   ".to_string();
        assert_eq!(form.validate(), Err(FormError::Missing("Message")));
    }

    #[test]
    fn test_field_accessors_cover_every_input() {
        let mut form = ChildForm::default();
        for (i, field) in ChildField::ALL.into_iter().enumerate() {
            form.set(field, i.to_string());
        }
        for (i, field) in ChildField::ALL.into_iter().enumerate() {
            assert_eq!(form.get(field), i.to_string());
        }
        assert_eq!(form.gender, "2");
        assert_eq!(form.cell, "10");
        assert_eq!(ChildField::Weight.input_type(), "number");
    }

    #[test]
    fn test_missing_field_message_uses_form_label() {
        let mut form = filled();
        form.weight = "  ".to_string();
        let err = form.parse().unwrap_err();
        assert_eq!(err, FormError::Missing("Weight (kg)"));
        assert_eq!(err.to_string(), "Weight (kg) is required");

        let mut form = filled();
        form.mother_name.clear();
        assert_eq!(
            form.parse().unwrap_err().to_string(),
            format!("{} is required", ChildField::MotherName.label())
        );
    }
}
