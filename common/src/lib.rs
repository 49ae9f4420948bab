//! Data shared between the herdbook server and its clients.
//!
//! - `model`: persisted entity shapes, their enumerations and the import report.
//! - `requests`: request bodies accepted by the HTTP API.

pub mod model;
pub mod requests;
