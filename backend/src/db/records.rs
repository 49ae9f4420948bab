//! Row mapping of the persisted entities for bulk inserts.

use chrono::NaiveDate;
use common::model::animal::Animal;
use common::model::calving::CalvingRecord;
use common::model::event::Event;
use common::model::field::Field;
use common::model::property::Property;
use common::model::slaughter::SlaughterRecord;
use common::model::vaccination::Vaccination;
use rusqlite::types::Value;

/// An entity that can be written as one row of `TABLE`.
///
/// `values` must yield exactly one value per entry of `COLUMNS`, in order.
pub trait Record {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn values(&self) -> Vec<Value>;

    fn insert_sql() -> String {
        let placeholders: Vec<String> = (1..=Self::COLUMNS.len()).map(|i| format!("?{}", i)).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            Self::TABLE,
            Self::COLUMNS.join(", "),
            placeholders.join(", ")
        )
    }
}

fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

fn opt_text(value: Option<&str>) -> Value {
    value.map(text).unwrap_or(Value::Null)
}

fn date(value: NaiveDate) -> Value {
    Value::Text(value.format("%Y-%m-%d").to_string())
}

fn opt_date(value: Option<NaiveDate>) -> Value {
    value.map(date).unwrap_or(Value::Null)
}

fn opt_real(value: Option<f64>) -> Value {
    value.map(Value::Real).unwrap_or(Value::Null)
}

fn flag(value: bool) -> Value {
    Value::Integer(i64::from(value))
}

impl Record for Animal {
    const TABLE: &'static str = "animals";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "tag_number",
        "name",
        "animal_type",
        "sex",
        "date_of_birth",
        "breeding_method",
        "sire_id",
        "dam_id",
        "herd_name",
        "organic",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.id),
            text(&self.tag_number),
            opt_text(self.name.as_deref()),
            text(self.animal_type.as_str()),
            text(self.sex.as_str()),
            opt_date(self.date_of_birth),
            opt_text(self.breeding_method.map(|m| m.as_str())),
            opt_text(self.sire_id.as_deref()),
            opt_text(self.dam_id.as_deref()),
            opt_text(self.herd_name.as_deref()),
            flag(self.organic),
        ]
    }
}

impl Record for Property {
    const TABLE: &'static str = "properties";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "location",
        "acreage",
        "is_leased",
        "lease_start_date",
        "lease_end_date",
        "notes",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.id),
            text(&self.name),
            opt_text(self.location.as_deref()),
            opt_real(self.acreage),
            flag(self.is_leased),
            opt_date(self.lease_start_date),
            opt_date(self.lease_end_date),
            opt_text(self.notes.as_deref()),
        ]
    }
}

impl Record for Field {
    const TABLE: &'static str = "fields";
    const COLUMNS: &'static [&'static str] = &["id", "name", "property_id", "acreage", "notes"];

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.id),
            text(&self.name),
            text(&self.property_id),
            opt_real(self.acreage),
            opt_text(self.notes.as_deref()),
        ]
    }
}

impl Record for Vaccination {
    const TABLE: &'static str = "vaccinations";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "animal_id",
        "vaccine_name",
        "administered_date",
        "dosage",
        "administered_by",
        "next_due_date",
        "notes",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.id),
            text(&self.animal_id),
            text(&self.vaccine_name),
            date(self.administered_date),
            opt_text(self.dosage.as_deref()),
            opt_text(self.administered_by.as_deref()),
            opt_date(self.next_due_date),
            opt_text(self.notes.as_deref()),
        ]
    }
}

impl Record for Event {
    const TABLE: &'static str = "events";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "animal_id",
        "event_type",
        "event_date",
        "description",
        "notes",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.id),
            text(&self.animal_id),
            text(&self.event_type),
            date(self.event_date),
            opt_text(self.description.as_deref()),
            opt_text(self.notes.as_deref()),
        ]
    }
}

impl Record for CalvingRecord {
    const TABLE: &'static str = "calving_records";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "dam_id",
        "calving_date",
        "calf_id",
        "calf_sex",
        "complications",
        "notes",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.id),
            text(&self.dam_id),
            date(self.calving_date),
            opt_text(self.calf_id.as_deref()),
            opt_text(self.calf_sex.map(|s| s.as_str())),
            flag(self.complications),
            opt_text(self.notes.as_deref()),
        ]
    }
}

impl Record for SlaughterRecord {
    const TABLE: &'static str = "slaughter_records";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "animal_id",
        "slaughter_date",
        "live_weight",
        "carcass_weight",
        "processor",
        "notes",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            text(&self.id),
            text(&self.animal_id),
            date(self.slaughter_date),
            opt_real(self.live_weight),
            opt_real(self.carcass_weight),
            opt_text(self.processor.as_deref()),
            opt_text(self.notes.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_arity<R: Record>(sample: &R) {
        assert_eq!(sample.values().len(), R::COLUMNS.len(), "{}", R::TABLE);
    }

    #[test]
    fn insert_sql_lists_every_column() {
        assert_eq!(
            Field::insert_sql(),
            "INSERT INTO fields (id, name, property_id, acreage, notes) VALUES (?1, ?2, ?3, ?4, ?5)"
        );
    }

    #[test]
    fn values_match_columns() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        check_arity(&Field {
            id: "f".into(),
            name: "North".into(),
            property_id: "p".into(),
            acreage: None,
            notes: None,
        });
        check_arity(&Event {
            id: "e".into(),
            animal_id: "a".into(),
            event_type: "weighing".into(),
            event_date: day,
            description: None,
            notes: None,
        });
        check_arity(&SlaughterRecord {
            id: "s".into(),
            animal_id: "a".into(),
            slaughter_date: day,
            live_weight: Some(510.0),
            carcass_weight: None,
            processor: None,
            notes: None,
        });
    }

    #[test]
    fn dates_and_flags_use_storage_spelling() {
        assert_eq!(date(NaiveDate::from_ymd_opt(2023, 1, 5).unwrap()), Value::Text("2023-01-05".into()));
        assert_eq!(flag(true), Value::Integer(1));
        assert_eq!(opt_text(None), Value::Null);
    }
}
