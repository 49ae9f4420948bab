use crate::model::animal::Sex;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A calving on record. `dam_id` is mandatory, `calf_id` is only set when
/// the calf was already registered as an animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalvingRecord {
    pub id: String,
    pub dam_id: String,
    pub calving_date: NaiveDate,
    pub calf_id: Option<String>,
    pub calf_sex: Option<Sex>,
    pub complications: bool,
    pub notes: Option<String>,
}
