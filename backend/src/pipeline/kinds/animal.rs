use crate::pipeline::kinds::ImportKind;
use crate::pipeline::resolver::{new_id, optional_animal, ReferenceLookup, ResolveError};
use crate::pipeline::schema::{CheckedRow, ColumnKind, ColumnRule};
use chrono::NaiveDate;
use common::model::animal::{Animal, AnimalType, BreedingMethod, Sex};
use common::model::kind::DataKind;

pub struct AnimalImport;

#[derive(Debug)]
pub struct AnimalDraft {
    tag_number: String,
    name: Option<String>,
    animal_type: AnimalType,
    sex: Sex,
    date_of_birth: Option<NaiveDate>,
    breeding_method: Option<BreedingMethod>,
    sire_tag: Option<String>,
    dam_tag: Option<String>,
    herd_name: Option<String>,
    organic: bool,
}

impl ImportKind for AnimalImport {
    type Draft = AnimalDraft;
    type Entity = Animal;

    const KIND: DataKind = DataKind::Animals;
    const COLUMNS: &'static [ColumnRule] = &[
        ColumnRule::required("tagNumber", ColumnKind::Text),
        ColumnRule::optional("name", ColumnKind::Text),
        ColumnRule::required("type", ColumnKind::OneOf(AnimalType::VALUES)),
        ColumnRule::required("sex", ColumnKind::OneOf(Sex::VALUES)),
        ColumnRule::optional("dateOfBirth", ColumnKind::Date),
        ColumnRule::optional("breedingMethod", ColumnKind::OneOf(BreedingMethod::VALUES)),
        ColumnRule::optional("sireTag", ColumnKind::Text),
        ColumnRule::optional("damTag", ColumnKind::Text),
        ColumnRule::optional("herdName", ColumnKind::Text),
        ColumnRule::optional("organic", ColumnKind::Flag),
    ];

    fn draft(row: &CheckedRow) -> Result<AnimalDraft, String> {
        Ok(AnimalDraft {
            tag_number: row.require_text("tagNumber")?,
            name: row.text("name"),
            animal_type: row.require_parsed("type")?,
            sex: row.require_parsed("sex")?,
            date_of_birth: row.date("dateOfBirth"),
            breeding_method: row.parsed("breedingMethod")?,
            sire_tag: row.text("sireTag"),
            dam_tag: row.text("damTag"),
            herd_name: row.text("herdName"),
            organic: row.flag("organic").unwrap_or(false),
        })
    }

    fn resolve<L>(draft: AnimalDraft, lookup: &L) -> Result<Animal, ResolveError>
    where
        L: ReferenceLookup + ?Sized,
    {
        let sire_id = optional_animal(lookup, "sireTag", draft.sire_tag.as_deref())?;
        let dam_id = optional_animal(lookup, "damTag", draft.dam_tag.as_deref())?;

        Ok(Animal {
            id: new_id(),
            tag_number: draft.tag_number,
            name: draft.name,
            animal_type: draft.animal_type,
            sex: draft.sex,
            date_of_birth: draft.date_of_birth,
            breeding_method: draft.breeding_method,
            sire_id,
            dam_id,
            herd_name: draft.herd_name,
            organic: draft.organic,
        })
    }
}
