use crate::pipeline::kinds::ImportKind;
use crate::pipeline::resolver::{new_id, require_animal, ReferenceLookup, ResolveError};
use crate::pipeline::schema::{CheckedRow, ColumnKind, ColumnRule};
use chrono::NaiveDate;
use common::model::kind::DataKind;
use common::model::slaughter::SlaughterRecord;

pub struct SlaughterImport;

#[derive(Debug)]
pub struct SlaughterDraft {
    animal_tag: String,
    slaughter_date: NaiveDate,
    live_weight: Option<f64>,
    carcass_weight: Option<f64>,
    processor: Option<String>,
    notes: Option<String>,
}

impl ImportKind for SlaughterImport {
    type Draft = SlaughterDraft;
    type Entity = SlaughterRecord;

    const KIND: DataKind = DataKind::SlaughterRecords;
    const COLUMNS: &'static [ColumnRule] = &[
        ColumnRule::required("animalTag", ColumnKind::Text),
        ColumnRule::required("slaughterDate", ColumnKind::Date),
        ColumnRule::optional("liveWeight", ColumnKind::Number),
        ColumnRule::optional("carcassWeight", ColumnKind::Number),
        ColumnRule::optional("processor", ColumnKind::Text),
        ColumnRule::optional("notes", ColumnKind::Text),
    ];

    fn draft(row: &CheckedRow) -> Result<SlaughterDraft, String> {
        Ok(SlaughterDraft {
            animal_tag: row.require_text("animalTag")?,
            slaughter_date: row.require_date("slaughterDate")?,
            live_weight: row.number("liveWeight"),
            carcass_weight: row.number("carcassWeight"),
            processor: row.text("processor"),
            notes: row.text("notes"),
        })
    }

    fn resolve<L>(draft: SlaughterDraft, lookup: &L) -> Result<SlaughterRecord, ResolveError>
    where
        L: ReferenceLookup + ?Sized,
    {
        let animal_id = require_animal(lookup, &draft.animal_tag)?;
        Ok(SlaughterRecord {
            id: new_id(),
            animal_id,
            slaughter_date: draft.slaughter_date,
            live_weight: draft.live_weight,
            carcass_weight: draft.carcass_weight,
            processor: draft.processor,
            notes: draft.notes,
        })
    }
}
