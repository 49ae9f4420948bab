use crate::pipeline::kinds::ImportKind;
use crate::pipeline::resolver::{new_id, require_property, ReferenceLookup, ResolveError};
use crate::pipeline::schema::{CheckedRow, ColumnKind, ColumnRule};
use common::model::field::Field;
use common::model::kind::DataKind;

pub struct FieldImport;

#[derive(Debug)]
pub struct FieldDraft {
    name: String,
    property_name: String,
    acreage: Option<f64>,
    notes: Option<String>,
}

impl ImportKind for FieldImport {
    type Draft = FieldDraft;
    type Entity = Field;

    const KIND: DataKind = DataKind::Fields;
    const COLUMNS: &'static [ColumnRule] = &[
        ColumnRule::required("name", ColumnKind::Text),
        ColumnRule::required("propertyName", ColumnKind::Text),
        ColumnRule::optional("acreage", ColumnKind::Number),
        ColumnRule::optional("notes", ColumnKind::Text),
    ];

    fn draft(row: &CheckedRow) -> Result<FieldDraft, String> {
        Ok(FieldDraft {
            name: row.require_text("name")?,
            property_name: row.require_text("propertyName")?,
            acreage: row.number("acreage"),
            notes: row.text("notes"),
        })
    }

    fn resolve<L>(draft: FieldDraft, lookup: &L) -> Result<Field, ResolveError>
    where
        L: ReferenceLookup + ?Sized,
    {
        let property_id = require_property(lookup, &draft.property_name)?;
        Ok(Field {
            id: new_id(),
            name: draft.name,
            property_id,
            acreage: draft.acreage,
            notes: draft.notes,
        })
    }
}
