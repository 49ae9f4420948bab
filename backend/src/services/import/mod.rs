//! CSV bulk import endpoints.
//!
//! The provided routes are:
//! - `POST /api/import/{kind}`: JSON body `{ "csvData": "..." }` holding the whole
//!   CSV file. Rows are validated and resolved one by one; every row that passes
//!   is written in a single bulk insert and the response reports
//!   `{ success, failed, errors }`.
//!
//! - `POST /api/import/{kind}/upload`: the same import, fed from the `file` part
//!   of a multipart/form-data upload.
//!
//! - `GET /api/import/{kind}/columns`: required and optional column names of a
//!   kind, for building CSV templates.
//!
//! `{kind}` is one of the `DataKind` slugs (`animals`, `properties`, `fields`,
//! `vaccinations`, `events`, `calving-records`, `slaughter-records`).

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod columns;
mod process;
mod upload;

const API_PATH: &str = "/api/import";

/// Configures and returns the Actix scope for CSV import routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/{kind}", post().to(process::process))
        .route("/{kind}/upload", post().to(upload::process))
        .route("/{kind}/columns", get().to(columns::process))
}
