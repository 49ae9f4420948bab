use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccination {
    pub id: String,
    pub animal_id: String,
    pub vaccine_name: String,
    pub administered_date: NaiveDate,
    pub dosage: Option<String>,
    pub administered_by: Option<String>,
    pub next_due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
