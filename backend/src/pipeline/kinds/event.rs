use crate::pipeline::kinds::ImportKind;
use crate::pipeline::resolver::{new_id, require_animal, ReferenceLookup, ResolveError};
use crate::pipeline::schema::{CheckedRow, ColumnKind, ColumnRule};
use chrono::NaiveDate;
use common::model::event::Event;
use common::model::kind::DataKind;

pub struct EventImport;

#[derive(Debug)]
pub struct EventDraft {
    animal_tag: String,
    event_type: String,
    event_date: NaiveDate,
    description: Option<String>,
    notes: Option<String>,
}

impl ImportKind for EventImport {
    type Draft = EventDraft;
    type Entity = Event;

    const KIND: DataKind = DataKind::Events;
    const COLUMNS: &'static [ColumnRule] = &[
        ColumnRule::required("animalTag", ColumnKind::Text),
        ColumnRule::required("eventType", ColumnKind::Text),
        ColumnRule::required("eventDate", ColumnKind::Date),
        ColumnRule::optional("description", ColumnKind::Text),
        ColumnRule::optional("notes", ColumnKind::Text),
    ];

    fn draft(row: &CheckedRow) -> Result<EventDraft, String> {
        Ok(EventDraft {
            animal_tag: row.require_text("animalTag")?,
            event_type: row.require_text("eventType")?,
            event_date: row.require_date("eventDate")?,
            description: row.text("description"),
            notes: row.text("notes"),
        })
    }

    fn resolve<L>(draft: EventDraft, lookup: &L) -> Result<Event, ResolveError>
    where
        L: ReferenceLookup + ?Sized,
    {
        let animal_id = require_animal(lookup, &draft.animal_tag)?;
        Ok(Event {
            id: new_id(),
            animal_id,
            event_type: draft.event_type,
            event_date: draft.event_date,
            description: draft.description,
            notes: draft.notes,
        })
    }
}
