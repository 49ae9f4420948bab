use serde::Deserialize;

/// Request payload for `POST /api/import/{kind}`.
/// Carries the whole CSV file as text, header line first.
#[derive(Deserialize)]
pub struct ImportRequest {
    #[serde(rename = "csvData")]
    pub csv_data: String,
}
