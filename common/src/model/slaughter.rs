use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaughterRecord {
    pub id: String,
    pub animal_id: String,
    pub slaughter_date: NaiveDate,
    pub live_weight: Option<f64>,
    pub carcass_weight: Option<f64>,
    pub processor: Option<String>,
    pub notes: Option<String>,
}
