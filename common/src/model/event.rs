use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Free-form dated event recorded against an animal (treatment, weighing,
/// movement, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub animal_id: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub description: Option<String>,
    pub notes: Option<String>,
}
