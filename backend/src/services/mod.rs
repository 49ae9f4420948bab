//! HTTP surface of the server, one sub-module per route scope.
//!
//! - `import`: CSV bulk import per data kind (`/api/import`).
//! - `export`: CSV download per data kind (`/api/export`).
//! - `health`: liveness probe (`/api/health`).

pub mod export;
pub mod health;
pub mod import;

use crate::error::ApiError;
use actix_web::web;
use common::model::kind::DataKind;

/// Parses the `{kind}` path segment shared by the import and export routes.
pub(crate) fn parse_kind(slug: &str) -> Result<DataKind, ApiError> {
    slug.parse::<DataKind>().map_err(ApiError::UnknownKind)
}

/// JSON extractor settings: body size limit, and malformed bodies answered
/// in the same `{ "error": ... }` shape as every other fatal error.
pub fn json_config(limit_bytes: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit_bytes)
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}
