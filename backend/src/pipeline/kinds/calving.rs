use crate::pipeline::kinds::ImportKind;
use crate::pipeline::resolver::{
    new_id, optional_animal, require_animal, ReferenceLookup, ResolveError,
};
use crate::pipeline::schema::{CheckedRow, ColumnKind, ColumnRule};
use chrono::NaiveDate;
use common::model::animal::Sex;
use common::model::calving::CalvingRecord;
use common::model::kind::DataKind;

pub struct CalvingImport;

#[derive(Debug)]
pub struct CalvingDraft {
    dam_tag: String,
    calving_date: NaiveDate,
    calf_tag: Option<String>,
    calf_sex: Option<Sex>,
    complications: bool,
    notes: Option<String>,
}

impl ImportKind for CalvingImport {
    type Draft = CalvingDraft;
    type Entity = CalvingRecord;

    const KIND: DataKind = DataKind::CalvingRecords;
    const COLUMNS: &'static [ColumnRule] = &[
        ColumnRule::required("damTag", ColumnKind::Text),
        ColumnRule::required("calvingDate", ColumnKind::Date),
        ColumnRule::optional("calfTag", ColumnKind::Text),
        ColumnRule::optional("calfSex", ColumnKind::OneOf(Sex::VALUES)),
        ColumnRule::optional("complications", ColumnKind::Flag),
        ColumnRule::optional("notes", ColumnKind::Text),
    ];

    fn draft(row: &CheckedRow) -> Result<CalvingDraft, String> {
        Ok(CalvingDraft {
            dam_tag: row.require_text("damTag")?,
            calving_date: row.require_date("calvingDate")?,
            calf_tag: row.text("calfTag"),
            calf_sex: row.parsed("calfSex")?,
            complications: row.flag("complications").unwrap_or(false),
            notes: row.text("notes"),
        })
    }

    fn resolve<L>(draft: CalvingDraft, lookup: &L) -> Result<CalvingRecord, ResolveError>
    where
        L: ReferenceLookup + ?Sized,
    {
        let dam_id = require_animal(lookup, &draft.dam_tag)?;
        let calf_id = optional_animal(lookup, "calfTag", draft.calf_tag.as_deref())?;
        Ok(CalvingRecord {
            id: new_id(),
            dam_id,
            calving_date: draft.calving_date,
            calf_id,
            calf_sex: draft.calf_sex,
            complications: draft.complications,
            notes: draft.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::kinds::test_support::draft_of;
    use crate::pipeline::resolver::tests::StubLookup;

    fn calving(pairs: &[(&str, &str)], lookup: &StubLookup) -> Result<CalvingRecord, String> {
        let draft = draft_of::<CalvingImport>(pairs)?;
        CalvingImport::resolve(draft, lookup).map_err(|e| e.to_string())
    }

    #[test]
    fn dam_is_required_calf_is_optional() {
        let lookup = StubLookup::default().with_animal("D1", "id-d1");

        let record = calving(
            &[("damTag", "D1"), ("calvingDate", "2024-02-14"), ("calfTag", "C-NEW"), ("calfSex", "female")],
            &lookup,
        )
        .unwrap();
        assert_eq!(record.dam_id, "id-d1");
        assert_eq!(record.calf_id, None);
        assert_eq!(record.calf_sex, Some(Sex::Female));
        assert!(!record.complications);

        let err = calving(&[("damTag", "D2"), ("calvingDate", "2024-02-14")], &lookup).unwrap_err();
        assert_eq!(err, "Animal with tag 'D2' not found");
    }

    #[test]
    fn registered_calf_is_linked() {
        let lookup = StubLookup::default().with_animal("D1", "id-d1").with_animal("C1", "id-c1");
        let record = calving(
            &[("damTag", "D1"), ("calvingDate", "2024-02-14"), ("calfTag", "C1"), ("complications", "yes")],
            &lookup,
        )
        .unwrap();
        assert_eq!(record.calf_id.as_deref(), Some("id-c1"));
        assert!(record.complications);
    }
}
