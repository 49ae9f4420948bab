//! CSV bulk-import pipeline.
//!
//! One import call runs, synchronously:
//!
//! 1. `parser`: CSV text into raw rows. Any structural problem aborts the call.
//! 2. `schema` + `kinds`: every row is checked and converted into a typed
//!    draft on its own, in parallel. Failures become row errors.
//! 3. `resolver`: natural keys in each draft are replaced by surrogate IDs
//!    looked up among persisted records. A missing required reference fails
//!    the row; a missing optional one is dropped.
//! 4. `BulkWriter`: all resolved rows are written in one operation. A write
//!    failure aborts the call and nothing is persisted.

pub mod kinds;
pub mod parser;
pub mod resolver;
pub mod schema;

use crate::db::records::Record;
use crate::db::StoreError;
use crate::error::ApiError;
use crate::pipeline::kinds::{
    AnimalImport, CalvingImport, EventImport, FieldImport, ImportKind, PropertyImport,
    SlaughterImport, VaccinationImport,
};
use crate::pipeline::parser::{ParseError, RawRow};
use crate::pipeline::resolver::{ReferenceLookup, ResolveError};
use crate::pipeline::schema::ColumnRule;
use common::model::import::{ImportResult, RowError};
use common::model::kind::DataKind;
use log::{debug, info};
use rayon::prelude::*;
use std::time::Instant;

/// Persists a batch of entities as a single operation.
pub trait BulkWriter {
    fn insert_all<R: Record>(&mut self, rows: &[R]) -> Result<usize, StoreError>;
}

/// Imports `csv_text` as records of `kind`.
pub fn import<S>(kind: DataKind, csv_text: &str, store: &mut S) -> Result<ImportResult, ApiError>
where
    S: ReferenceLookup + BulkWriter,
{
    match kind {
        DataKind::Animals => run_import::<AnimalImport, S>(csv_text, store),
        DataKind::Properties => run_import::<PropertyImport, S>(csv_text, store),
        DataKind::Fields => run_import::<FieldImport, S>(csv_text, store),
        DataKind::Vaccinations => run_import::<VaccinationImport, S>(csv_text, store),
        DataKind::Events => run_import::<EventImport, S>(csv_text, store),
        DataKind::CalvingRecords => run_import::<CalvingImport, S>(csv_text, store),
        DataKind::SlaughterRecords => run_import::<SlaughterImport, S>(csv_text, store),
    }
}

/// Column schema of `kind`, in declared order.
pub fn columns(kind: DataKind) -> &'static [ColumnRule] {
    match kind {
        DataKind::Animals => AnimalImport::COLUMNS,
        DataKind::Properties => PropertyImport::COLUMNS,
        DataKind::Fields => FieldImport::COLUMNS,
        DataKind::Vaccinations => VaccinationImport::COLUMNS,
        DataKind::Events => EventImport::COLUMNS,
        DataKind::CalvingRecords => CalvingImport::COLUMNS,
        DataKind::SlaughterRecords => SlaughterImport::COLUMNS,
    }
}

pub fn run_import<K, S>(csv_text: &str, store: &mut S) -> Result<ImportResult, ApiError>
where
    K: ImportKind,
    S: ReferenceLookup + BulkWriter,
{
    let start = Instant::now();

    let parser = parser::parse(csv_text)?;
    debug!("{} import header: {:?}", K::KIND, parser.headers());
    let rows = parser.collect::<Result<Vec<RawRow>, ParseError>>()?;

    let drafts: Vec<Result<K::Draft, String>> = rows
        .par_iter()
        .map(|row| schema::check_row(K::COLUMNS, row).and_then(|checked| K::draft(&checked)))
        .collect();

    let mut entities = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();
    for (row, draft) in rows.iter().zip(drafts) {
        let draft = match draft {
            Ok(draft) => draft,
            Err(error) => {
                errors.push(row_error(row, error));
                continue;
            }
        };
        match K::resolve(draft, &*store) {
            Ok(entity) => entities.push(entity),
            Err(ResolveError::Missing(error)) => errors.push(row_error(row, error)),
            Err(ResolveError::Store(e)) => return Err(ApiError::Lookup(e)),
        }
    }

    if !entities.is_empty() {
        store.insert_all(&entities).map_err(ApiError::Write)?;
    }

    let result = ImportResult {
        success: entities.len(),
        failed: errors.len(),
        errors,
    };
    info!(
        "{} import finished in {:.2?}: {} rows, {} imported, {} failed",
        K::KIND,
        start.elapsed(),
        rows.len(),
        result.success,
        result.failed
    );
    Ok(result)
}

fn row_error(row: &RawRow, error: String) -> RowError {
    RowError {
        row: row.number,
        data: row.cells.clone(),
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteStore;
    use crate::pipeline::resolver::tests::{storage_failure, StubLookup};
    use rusqlite::types::Value;
    use std::collections::HashMap;

    /// Stub store: canned lookups, records inserts per table.
    #[derive(Default)]
    struct MemoryStore {
        lookup: StubLookup,
        tables: HashMap<&'static str, Vec<Vec<Value>>>,
        insert_calls: usize,
        fail_writes: bool,
    }

    impl ReferenceLookup for MemoryStore {
        fn animal_id_by_tag(&self, tag: &str) -> Result<Option<String>, StoreError> {
            self.lookup.animal_id_by_tag(tag)
        }

        fn property_id_by_name(&self, name: &str) -> Result<Option<String>, StoreError> {
            self.lookup.property_id_by_name(name)
        }
    }

    impl BulkWriter for MemoryStore {
        fn insert_all<R: Record>(&mut self, rows: &[R]) -> Result<usize, StoreError> {
            self.insert_calls += 1;
            if self.fail_writes {
                return Err(storage_failure());
            }
            self.tables
                .entry(R::TABLE)
                .or_default()
                .extend(rows.iter().map(|row| row.values()));
            Ok(rows.len())
        }
    }

    impl MemoryStore {
        fn rows(&self, table: &str) -> &[Vec<Value>] {
            self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
        }
    }

    const ANIMAL_HEADER: &str = "tagNumber,name,type,sex,dateOfBirth,breedingMethod,sireTag,damTag,herdName,organic";

    #[test]
    fn valid_and_missing_tag_rows_give_partial_success() {
        let csv = format!(
            "{}\nA1,Bess,dairy,female,2023-01-01,ai,,,Main,yes\n,Daisy,dairy,female,2023-02-01,,,,,\n",
            ANIMAL_HEADER
        );
        let mut store = MemoryStore::default();
        let result = import(DataKind::Animals, &csv, &mut store).unwrap();

        assert_eq!(result.success, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.errors[0].row, 2);
        assert!(result.errors[0].error.contains("tagNumber"));
        assert_eq!(result.errors[0].data.get("name").map(String::as_str), Some("Daisy"));
        assert_eq!(store.rows("animals").len(), 1);
        assert_eq!(store.insert_calls, 1);
    }

    #[test]
    fn wrong_case_enum_is_a_row_failure() {
        let csv = "tagNumber,type,sex\nA1,Dairy,female\n";
        let mut store = MemoryStore::default();
        let result = import(DataKind::Animals, csv, &mut store).unwrap();
        assert_eq!((result.success, result.failed), (0, 1));
        assert!(result.errors[0].error.contains("'Dairy'"));
        assert_eq!(store.insert_calls, 0);
    }

    #[test]
    fn unknown_sire_is_dropped_not_failed() {
        let csv = "tagNumber,type,sex,sireTag,damTag\nC1,beef,male,NOPE,D1\n";
        let mut store = MemoryStore {
            lookup: StubLookup::default().with_animal("D1", "id-d1"),
            ..MemoryStore::default()
        };
        let result = import(DataKind::Animals, csv, &mut store).unwrap();
        assert_eq!((result.success, result.failed), (1, 0));

        let row = &store.rows("animals")[0];
        // sire_id, dam_id
        assert_eq!(row[7], Value::Null);
        assert_eq!(row[8], Value::Text("id-d1".to_string()));
    }

    #[test]
    fn unknown_vaccinated_animal_fails_the_row() {
        let csv = "animalTag,vaccineName,administeredDate\n\
                   A1,Bovilis,2024-04-01\n\
                   GHOST,Bovilis,2024-04-01\n";
        let mut store = MemoryStore {
            lookup: StubLookup::default().with_animal("A1", "id-a1"),
            ..MemoryStore::default()
        };
        let result = import(DataKind::Vaccinations, csv, &mut store).unwrap();
        assert_eq!((result.success, result.failed), (1, 1));
        assert_eq!(result.errors[0].row, 2);
        assert!(result.errors[0].error.contains("GHOST"));
        assert_eq!(store.rows("vaccinations").len(), 1);
        assert_eq!(store.rows("vaccinations")[0][1], Value::Text("id-a1".to_string()));
    }

    #[test]
    fn field_with_unknown_property_is_not_created() {
        let csv = "name,propertyName\nNorth,Nowhere Farm\n";
        let mut store = MemoryStore::default();
        let result = import(DataKind::Fields, csv, &mut store).unwrap();
        assert_eq!((result.success, result.failed), (0, 1));
        assert!(result.errors[0].error.contains("Nowhere Farm"));
        assert!(store.rows("fields").is_empty());
    }

    #[test]
    fn success_plus_failed_equals_rows_submitted() {
        let csv = "animalTag,eventType,eventDate\n\
                   A1,weighing,2024-01-01\n\
                   A1,,2024-01-02\n\
                   A2,treatment,2024-01-03\n\
                   \n\
                   A1,moved,2024-13-01\n\
                   A1,moved,2024-12-01\n";
        let mut store = MemoryStore {
            lookup: StubLookup::default().with_animal("A1", "id-a1"),
            ..MemoryStore::default()
        };
        let result = import(DataKind::Events, csv, &mut store).unwrap();
        assert_eq!(result.total(), 5);
        assert_eq!(result.success, 2);
        let failed_rows: Vec<_> = result.errors.iter().map(|e| e.row).collect();
        assert_eq!(failed_rows, vec![2, 3, 4]);
    }

    #[test]
    fn corrupting_one_row_leaves_the_others_alone() {
        let good = "animalTag,slaughterDate,liveWeight\nA1,2024-05-01,600\nA2,2024-05-02,580\nA3,2024-05-03,610\n";
        let bad = "animalTag,slaughterDate,liveWeight\nA1,2024-05-01,600\nA2,yesterday,heavy\nA3,2024-05-03,610\n";
        let lookup = || {
            StubLookup::default()
                .with_animal("A1", "1")
                .with_animal("A2", "2")
                .with_animal("A3", "3")
        };

        let mut store = MemoryStore { lookup: lookup(), ..MemoryStore::default() };
        let clean = import(DataKind::SlaughterRecords, good, &mut store).unwrap();
        let mut store = MemoryStore { lookup: lookup(), ..MemoryStore::default() };
        let dirty = import(DataKind::SlaughterRecords, bad, &mut store).unwrap();

        assert_eq!(clean.success, 3);
        assert_eq!(dirty.success, 2);
        assert_eq!(dirty.errors.len(), 1);
        assert_eq!(dirty.errors[0].row, 2);
        let animal_ids: Vec<_> = store.rows("slaughter_records").iter().map(|r| r[1].clone()).collect();
        assert_eq!(animal_ids, vec![Value::Text("1".into()), Value::Text("3".into())]);
    }

    #[test]
    fn parse_failure_is_fatal_and_writes_nothing() {
        let mut store = MemoryStore::default();
        let err = import(DataKind::Animals, "tagNumber,type\n\"A1,dairy\n", &mut store).unwrap_err();
        assert!(matches!(err, ApiError::Parse(ParseError::UnterminatedQuote)));
        assert_eq!(store.insert_calls, 0);
    }

    #[test]
    fn write_failure_is_fatal() {
        let mut store = MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        };
        let err = import(DataKind::Properties, "name\nHome Farm\n", &mut store).unwrap_err();
        assert!(matches!(err, ApiError::Write(_)));
    }

    #[test]
    fn lookup_failure_is_fatal() {
        let mut store = MemoryStore {
            lookup: StubLookup {
                broken: true,
                ..StubLookup::default()
            },
            ..MemoryStore::default()
        };
        let err = import(DataKind::Events, "animalTag,eventType,eventDate\nA1,x,2024-01-01\n", &mut store)
            .unwrap_err();
        assert!(matches!(err, ApiError::Lookup(_)));
        assert_eq!(store.insert_calls, 0);
    }

    #[test]
    fn all_failed_rows_still_produce_a_report() {
        let mut store = MemoryStore::default();
        let result = import(DataKind::Fields, "name,propertyName\nNorth,\nSouth,\n", &mut store).unwrap();
        assert_eq!((result.success, result.failed), (0, 2));
        assert_eq!(store.insert_calls, 0);
    }

    #[test]
    fn delimiter_only_line_counts_as_a_failed_row() {
        let csv = "tagNumber,type,sex\nA1,dairy,female\n,,\nA2,beef,male\n";
        let mut store = MemoryStore::default();
        let result = import(DataKind::Animals, csv, &mut store).unwrap();
        assert_eq!(result.total(), 3);
        assert_eq!((result.success, result.failed), (2, 1));
        assert_eq!(result.errors[0].row, 2);
        assert!(result.errors[0].error.starts_with("Missing required field 'tagNumber'"));
    }

    #[test]
    fn row_error_data_holds_trimmed_cells() {
        let csv = "tagNumber , type,sex\n  A1 ,Dairy ,  female\n";
        let mut store = MemoryStore::default();
        let result = import(DataKind::Animals, csv, &mut store).unwrap();
        let data = &result.errors[0].data;
        assert_eq!(data.get("tagNumber").map(String::as_str), Some("A1"));
        assert_eq!(data.get("type").map(String::as_str), Some("Dairy"));
        assert_eq!(data.get("sex").map(String::as_str), Some("female"));
    }

    fn stored_text(store: &SqliteStore, sql: &str) -> Option<String> {
        store.connection().query_row(sql, [], |r| r.get(0)).unwrap()
    }

    #[test]
    fn parents_in_the_same_batch_are_not_linked() {
        let mut store = SqliteStore::in_memory().unwrap();
        let csv = "tagNumber,type,sex,damTag\nD1,beef,female,\nC1,beef,male,D1\n";
        let result = import(DataKind::Animals, csv, &mut store).unwrap();
        assert_eq!((result.success, result.failed), (2, 0));
        assert_eq!(stored_text(&store, "SELECT dam_id FROM animals WHERE tag_number = 'C1'"), None);
    }

    #[test]
    fn calf_imported_later_is_not_linked() {
        let mut store = SqliteStore::in_memory().unwrap();
        import(DataKind::Animals, "tagNumber,type,sex\nD1,beef,female\n", &mut store).unwrap();

        let calvings = "damTag,calvingDate,calfTag,calfSex\nD1,2024-03-01,C1,male\n";
        let result = import(DataKind::CalvingRecords, calvings, &mut store).unwrap();
        assert_eq!((result.success, result.failed), (1, 0));
        import(DataKind::Animals, "tagNumber,type,sex,damTag\nC1,beef,male,D1\n", &mut store).unwrap();

        assert_eq!(stored_text(&store, "SELECT calf_id FROM calving_records"), None);
        assert!(stored_text(&store, "SELECT dam_id FROM calving_records").is_some());
        assert!(stored_text(&store, "SELECT dam_id FROM animals WHERE tag_number = 'C1'").is_some());
    }

    #[test]
    fn every_kind_has_columns() {
        for kind in DataKind::ALL {
            assert!(columns(kind).iter().any(|c| c.required), "{kind}");
        }
    }
}
