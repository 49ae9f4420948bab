use crate::config::AppConfig;
use crate::error::ApiError;
use crate::pipeline::parser::ParseError;
use crate::services::import::process::import_csv;
use crate::services::parse_kind;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;

/// Handler for `POST /api/import/{kind}/upload`.
///
/// Same contract as the JSON endpoint, but the CSV arrives as the `file` part
/// of a multipart form. Other parts are ignored.
pub(crate) async fn process(
    config: web::Data<AppConfig>,
    kind: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    let csv_data = read_csv_file(payload, config.json_limit_bytes).await?;
    let result = import_csv(config.database_path.clone(), kind, csv_data).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Collects the `file` part into a string, enforcing the `.csv` extension and
/// the configured size limit.
async fn read_csv_file(mut payload: Multipart, limit: usize) -> Result<String, ApiError> {
    let mut csv_bytes: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ApiError::BadRequest(e.to_string()))?;
        let part_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if part_name.as_deref() != Some("file") {
            while let Some(chunk) = field.next().await {
                chunk.map_err(|e| ApiError::BadRequest(e.to_string()))?;
            }
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !filename.to_ascii_lowercase().ends_with(".csv") {
            return Err(ApiError::BadRequest("The file must end with .csv".to_string()));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ApiError::BadRequest(e.to_string()))?;
            if bytes.len() + chunk.len() > limit {
                return Err(ApiError::BadRequest(format!(
                    "The file is larger than {} bytes",
                    limit
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        csv_bytes = Some(bytes);
    }

    let bytes = csv_bytes.ok_or_else(|| ApiError::BadRequest("Missing file".to_string()))?;
    String::from_utf8(bytes).map_err(|_| ApiError::Parse(ParseError::NotUtf8))
}
