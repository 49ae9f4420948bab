use crate::pipeline::kinds::ImportKind;
use crate::pipeline::resolver::{new_id, require_animal, ReferenceLookup, ResolveError};
use crate::pipeline::schema::{CheckedRow, ColumnKind, ColumnRule};
use chrono::NaiveDate;
use common::model::kind::DataKind;
use common::model::vaccination::Vaccination;

pub struct VaccinationImport;

#[derive(Debug)]
pub struct VaccinationDraft {
    animal_tag: String,
    vaccine_name: String,
    administered_date: NaiveDate,
    dosage: Option<String>,
    administered_by: Option<String>,
    next_due_date: Option<NaiveDate>,
    notes: Option<String>,
}

impl ImportKind for VaccinationImport {
    type Draft = VaccinationDraft;
    type Entity = Vaccination;

    const KIND: DataKind = DataKind::Vaccinations;
    const COLUMNS: &'static [ColumnRule] = &[
        ColumnRule::required("animalTag", ColumnKind::Text),
        ColumnRule::required("vaccineName", ColumnKind::Text),
        ColumnRule::required("administeredDate", ColumnKind::Date),
        ColumnRule::optional("dosage", ColumnKind::Text),
        ColumnRule::optional("administeredBy", ColumnKind::Text),
        ColumnRule::optional("nextDueDate", ColumnKind::Date),
        ColumnRule::optional("notes", ColumnKind::Text),
    ];

    fn draft(row: &CheckedRow) -> Result<VaccinationDraft, String> {
        Ok(VaccinationDraft {
            animal_tag: row.require_text("animalTag")?,
            vaccine_name: row.require_text("vaccineName")?,
            administered_date: row.require_date("administeredDate")?,
            dosage: row.text("dosage"),
            administered_by: row.text("administeredBy"),
            next_due_date: row.date("nextDueDate"),
            notes: row.text("notes"),
        })
    }

    fn resolve<L>(draft: VaccinationDraft, lookup: &L) -> Result<Vaccination, ResolveError>
    where
        L: ReferenceLookup + ?Sized,
    {
        let animal_id = require_animal(lookup, &draft.animal_tag)?;
        Ok(Vaccination {
            id: new_id(),
            animal_id,
            vaccine_name: draft.vaccine_name,
            administered_date: draft.administered_date,
            dosage: draft.dosage,
            administered_by: draft.administered_by,
            next_due_date: draft.next_due_date,
            notes: draft.notes,
        })
    }
}
