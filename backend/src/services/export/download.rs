use crate::config::AppConfig;
use crate::db::{SqliteStore, StoreError};
use crate::error::ApiError;
use crate::pipeline;
use crate::services::parse_kind;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use common::model::kind::DataKind;
use log::info;
use rusqlite::types::ValueRef;
use rusqlite::Connection;

/// Handler for `GET /api/export/{kind}`.
pub(crate) async fn process(
    config: web::Data<AppConfig>,
    kind: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    let database_path = config.database_path.clone();

    let body = tokio::task::spawn_blocking(move || {
        let store = SqliteStore::open(&database_path).map_err(ApiError::Storage)?;
        export_csv(store.connection(), kind)
    })
    .await
    .map_err(|e| ApiError::Task(e.to_string()))??;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(format!("{}.csv", kind.slug()))],
        })
        .body(body))
}

/// Selects the import columns of `kind`, in import order. Flags are spelled
/// the way the importer accepts them.
fn select_sql(kind: DataKind) -> &'static str {
    match kind {
        DataKind::Animals => {
            "SELECT a.tag_number, a.name, a.animal_type, a.sex, a.date_of_birth, a.breeding_method,
                    s.tag_number, d.tag_number, a.herd_name,
                    CASE a.organic WHEN 0 THEN 'false' ELSE 'true' END
             FROM animals a
             LEFT JOIN animals s ON s.id = a.sire_id
             LEFT JOIN animals d ON d.id = a.dam_id
             ORDER BY a.rowid"
        }
        DataKind::Properties => {
            "SELECT name, location, acreage,
                    CASE is_leased WHEN 0 THEN 'no' ELSE 'yes' END,
                    lease_start_date, lease_end_date, notes
             FROM properties
             ORDER BY rowid"
        }
        DataKind::Fields => {
            "SELECT f.name, p.name, f.acreage, f.notes
             FROM fields f
             JOIN properties p ON p.id = f.property_id
             ORDER BY f.rowid"
        }
        DataKind::Vaccinations => {
            "SELECT a.tag_number, v.vaccine_name, v.administered_date, v.dosage,
                    v.administered_by, v.next_due_date, v.notes
             FROM vaccinations v
             JOIN animals a ON a.id = v.animal_id
             ORDER BY v.rowid"
        }
        DataKind::Events => {
            "SELECT a.tag_number, e.event_type, e.event_date, e.description, e.notes
             FROM events e
             JOIN animals a ON a.id = e.animal_id
             ORDER BY e.rowid"
        }
        DataKind::CalvingRecords => {
            "SELECT d.tag_number, c.calving_date, calf.tag_number, c.calf_sex,
                    CASE c.complications WHEN 0 THEN 'false' ELSE 'true' END,
                    c.notes
             FROM calving_records c
             JOIN animals d ON d.id = c.dam_id
             LEFT JOIN animals calf ON calf.id = c.calf_id
             ORDER BY c.rowid"
        }
        DataKind::SlaughterRecords => {
            "SELECT a.tag_number, s.slaughter_date, s.live_weight, s.carcass_weight,
                    s.processor, s.notes
             FROM slaughter_records s
             JOIN animals a ON a.id = s.animal_id
             ORDER BY s.rowid"
        }
    }
}

fn cell(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    }
}

fn storage(err: rusqlite::Error) -> ApiError {
    ApiError::Storage(StoreError::from(err))
}

pub(crate) fn export_csv(conn: &Connection, kind: DataKind) -> Result<String, ApiError> {
    let header: Vec<&str> = pipeline::columns(kind).iter().map(|rule| rule.name).collect();
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&header)
        .map_err(|e| ApiError::Export(e.to_string()))?;

    let mut stmt = conn.prepare(select_sql(kind)).map_err(storage)?;
    let mut rows = stmt.query([]).map_err(storage)?;
    let mut exported = 0usize;
    while let Some(row) = rows.next().map_err(storage)? {
        let mut record = Vec::with_capacity(header.len());
        for idx in 0..header.len() {
            record.push(cell(row.get_ref(idx).map_err(storage)?));
        }
        writer
            .write_record(&record)
            .map_err(|e| ApiError::Export(e.to_string()))?;
        exported += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Export(e.to_string()))?;
    info!("Exported {} {} rows", exported, kind);
    String::from_utf8(bytes).map_err(|e| ApiError::Export(e.to_string()))
}
