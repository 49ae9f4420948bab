//! Fatal errors of an API call.
//!
//! Per-row problems are never represented here: they travel inside a
//! successful `ImportResult`. An `ApiError` means the call as a whole failed
//! and is rendered as `{ "error": "..." }` with a matching status code.

use crate::db::StoreError;
use crate::pipeline::parser::ParseError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::{error, warn};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unrecognized data kind '{0}'")]
    UnknownKind(String),
    #[error("could not parse CSV: {0}")]
    Parse(#[from] ParseError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("storage error: {0}")]
    Storage(#[source] StoreError),
    #[error("reference lookup failed: {0}")]
    Lookup(#[source] StoreError),
    #[error("bulk write failed, nothing was imported: {0}")]
    Write(#[source] StoreError),
    #[error("could not write CSV export: {0}")]
    Export(String),
    #[error("background task failed: {0}")]
    Task(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnknownKind(_) => StatusCode::NOT_FOUND,
            ApiError::Parse(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_)
            | ApiError::Lookup(_)
            | ApiError::Write(_)
            | ApiError::Export(_)
            | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }
        HttpResponse::build(status).json(json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_errors_map_to_distinct_statuses() {
        assert_eq!(ApiError::UnknownKind("cows".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Parse(ParseError::MissingHeader).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Task("join".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_name_the_cause() {
        assert_eq!(
            ApiError::UnknownKind("cows".into()).to_string(),
            "unrecognized data kind 'cows'"
        );
        assert_eq!(
            ApiError::Parse(ParseError::UnterminatedQuote).to_string(),
            "could not parse CSV: unterminated quoted field"
        );
    }
}
