use crate::error::ApiError;
use crate::pipeline;
use crate::pipeline::schema::ColumnRule;
use crate::services::parse_kind;
use actix_web::{web, HttpResponse};
use common::model::import::ColumnSet;
use common::model::kind::DataKind;

pub(crate) async fn process(kind: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let kind = parse_kind(&kind)?;
    Ok(HttpResponse::Ok().json(column_set(kind)))
}

pub(crate) fn column_set(kind: DataKind) -> ColumnSet {
    let (required, optional): (Vec<&ColumnRule>, Vec<&ColumnRule>) =
        pipeline::columns(kind).iter().partition(|rule| rule.required);
    ColumnSet {
        kind,
        required: required.iter().map(|rule| rule.name.to_string()).collect(),
        optional: optional.iter().map(|rule| rule.name.to_string()).collect(),
    }
}
