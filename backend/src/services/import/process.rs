use crate::config::AppConfig;
use crate::db::SqliteStore;
use crate::error::ApiError;
use crate::pipeline;
use crate::services::parse_kind;
use actix_web::{web, HttpResponse};
use common::model::import::ImportResult;
use common::model::kind::DataKind;
use common::requests::ImportRequest;

/// Handler for `POST /api/import/{kind}`.
///
/// - `200 OK` with the `ImportResult` whenever the CSV could be parsed and the
///   bulk write succeeded, even if some (or all) rows were rejected.
/// - An `ApiError` response for unknown kinds, unparseable CSV and storage failures.
pub(crate) async fn process(
    config: web::Data<AppConfig>,
    kind: web::Path<String>,
    payload: web::Json<ImportRequest>,
) -> Result<HttpResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    let result = import_csv(config.database_path.clone(), kind, payload.into_inner().csv_data).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Runs the import pipeline on a blocking thread with its own connection.
pub(crate) async fn import_csv(
    database_path: String,
    kind: DataKind,
    csv_data: String,
) -> Result<ImportResult, ApiError> {
    tokio::task::spawn_blocking(move || {
        let mut store = SqliteStore::open(&database_path).map_err(ApiError::Storage)?;
        pipeline::import(kind, &csv_data, &mut store)
    })
    .await
    .map_err(|e| ApiError::Task(e.to_string()))?
}
