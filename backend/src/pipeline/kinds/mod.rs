//! One module per importable record kind: its column schema, the typed draft
//! a valid row becomes, and how the draft's natural keys are resolved.

mod animal;
mod calving;
mod event;
mod field;
mod property;
mod slaughter;
mod vaccination;

pub use animal::AnimalImport;
pub use calving::CalvingImport;
pub use event::EventImport;
pub use field::FieldImport;
pub use property::PropertyImport;
pub use slaughter::SlaughterImport;
pub use vaccination::VaccinationImport;

use crate::db::records::Record;
use crate::pipeline::resolver::{ReferenceLookup, ResolveError};
use crate::pipeline::schema::{CheckedRow, ColumnRule};
use common::model::kind::DataKind;

pub trait ImportKind {
    /// A schema-checked row, still referring to other records by natural key.
    type Draft: Send;
    /// The entity written to storage.
    type Entity: Record;

    const KIND: DataKind;
    const COLUMNS: &'static [ColumnRule];

    fn draft(row: &CheckedRow) -> Result<Self::Draft, String>;

    fn resolve<L>(draft: Self::Draft, lookup: &L) -> Result<Self::Entity, ResolveError>
    where
        L: ReferenceLookup + ?Sized;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ImportKind;
    use crate::pipeline::parser::RawRow;
    use crate::pipeline::schema::check_row;

    /// Runs the schema check and draft conversion of `K` over one row.
    pub(crate) fn draft_of<K: ImportKind>(pairs: &[(&str, &str)]) -> Result<K::Draft, String> {
        let row = RawRow {
            number: 1,
            cells: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        check_row(K::COLUMNS, &row).and_then(|checked| K::draft(&checked))
    }
}
