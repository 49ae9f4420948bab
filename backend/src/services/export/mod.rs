//! CSV export endpoint.
//!
//! `GET /api/export/{kind}` returns every stored record of a kind as a CSV
//! download. The header row is the import column set of the kind and
//! references are written back as tag numbers and property names, so an
//! exported file can be fed to `/api/import/{kind}` again.

use actix_web::web::{get, scope};
use actix_web::Scope;

mod download;

const API_PATH: &str = "/api/export";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{kind}", get().to(download::process))
}
