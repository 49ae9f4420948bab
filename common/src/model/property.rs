use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A farm property. Fields belong to a property and reference it by `name`
/// in CSV files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub acreage: Option<f64>,
    pub is_leased: bool,
    pub lease_start_date: Option<NaiveDate>,
    pub lease_end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
