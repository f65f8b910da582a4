//! `children` table rows.

#[cfg(feature = "server")]
use chrono::{DateTime, NaiveDate, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use store::{BirthPlace, ChildFields, ChildId, ChildRecord};
#[cfg(feature = "server")]
use uuid::Uuid;

/// Full birth record row from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct ChildRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub mother_name: String,
    pub father_name: String,
    pub weight: f64,
    pub province: String,
    pub district: String,
    pub sector: String,
    pub cell: String,
    pub birth_date: NaiveDate,
    pub registered_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl ChildRow {
    /// Convert to the record shape shared with the client.
    pub fn to_record(&self) -> Result<ChildRecord, String> {
        let id = u64::try_from(self.id).map_err(|e| e.to_string())?;
        let gender = self.gender.parse().map_err(|e: store::FormError| e.to_string())?;
        Ok(ChildRecord::new(
            ChildId(id),
            ChildFields {
                first_name: self.first_name.clone(),
                last_name: self.last_name.clone(),
                gender,
                mother_name: self.mother_name.clone(),
                father_name: self.father_name.clone(),
                weight: self.weight,
                birth_place: BirthPlace {
                    province: self.province.clone(),
                    district: self.district.clone(),
                    sector: self.sector.clone(),
                    cell: self.cell.clone(),
                },
                birth_date: self.birth_date,
            },
        ))
    }
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use store::Gender;

    fn row() -> ChildRow {
        ChildRow {
            id: 5,
            first_name: "Aline".to_string(),
            last_name: "Uwase".to_string(),
            gender: "Female".to_string(),
            mother_name: "Mukamana".to_string(),
            father_name: "Habimana".to_string(),
            weight: 3.2,
            province: "Kigali".to_string(),
            district: "Gasabo".to_string(),
            sector: "Remera".to_string(),
            cell: "Rukiri".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
            registered_by: Uuid::nil(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_to_record() {
        let record = row().to_record().unwrap();
        assert_eq!(record.id, ChildId(5));
        assert_eq!(record.fields.gender, Gender::Female);
        assert_eq!(record.fields.birth_place.to_string(), "Kigali, Gasabo, Remera, Rukiri");
    }

    #[test]
    fn test_row_with_unknown_gender_is_rejected() {
        let mut row = row();
        row.gender = "unknown".to_string();
        assert!(row.to_record().is_err());
    }
}
