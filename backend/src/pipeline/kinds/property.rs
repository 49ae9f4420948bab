use crate::pipeline::kinds::ImportKind;
use crate::pipeline::resolver::{new_id, ReferenceLookup, ResolveError};
use crate::pipeline::schema::{CheckedRow, ColumnKind, ColumnRule};
use chrono::NaiveDate;
use common::model::kind::DataKind;
use common::model::property::Property;

pub struct PropertyImport;

#[derive(Debug)]
pub struct PropertyDraft {
    name: String,
    location: Option<String>,
    acreage: Option<f64>,
    is_leased: bool,
    lease_start_date: Option<NaiveDate>,
    lease_end_date: Option<NaiveDate>,
    notes: Option<String>,
}

impl ImportKind for PropertyImport {
    type Draft = PropertyDraft;
    type Entity = Property;

    const KIND: DataKind = DataKind::Properties;
    const COLUMNS: &'static [ColumnRule] = &[
        ColumnRule::required("name", ColumnKind::Text),
        ColumnRule::optional("location", ColumnKind::Text),
        ColumnRule::optional("acreage", ColumnKind::Number),
        ColumnRule::optional("isLeased", ColumnKind::OneOf(&["yes", "no"])),
        ColumnRule::optional("leaseStartDate", ColumnKind::Date),
        ColumnRule::optional("leaseEndDate", ColumnKind::Date),
        ColumnRule::optional("notes", ColumnKind::Text),
    ];

    fn draft(row: &CheckedRow) -> Result<PropertyDraft, String> {
        Ok(PropertyDraft {
            name: row.require_text("name")?,
            location: row.text("location"),
            acreage: row.number("acreage"),
            is_leased: row.text("isLeased").as_deref() == Some("yes"),
            lease_start_date: row.date("leaseStartDate"),
            lease_end_date: row.date("leaseEndDate"),
            notes: row.text("notes"),
        })
    }

    fn resolve<L>(draft: PropertyDraft, _lookup: &L) -> Result<Property, ResolveError>
    where
        L: ReferenceLookup + ?Sized,
    {
        Ok(Property {
            id: new_id(),
            name: draft.name,
            location: draft.location,
            acreage: draft.acreage,
            is_leased: draft.is_leased,
            lease_start_date: draft.lease_start_date,
            lease_end_date: draft.lease_end_date,
            notes: draft.notes,
        })
    }
}
