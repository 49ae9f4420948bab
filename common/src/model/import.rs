use crate::model::kind::DataKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one import call.
///
/// A result with both `success > 0` and `failed > 0` is a valid partial
/// import; the caller decides whether that is acceptable. Fatal problems
/// (unparseable CSV, storage failures) never produce an `ImportResult`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Rows written by the bulk insert.
    pub success: usize,
    /// Rows rejected by validation or reference resolution.
    pub failed: usize,
    /// One entry per rejected row, in row order.
    pub errors: Vec<RowError>,
}

impl ImportResult {
    pub fn total(&self) -> usize {
        self.success + self.failed
    }
}

/// A single rejected row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based data row number; the header line is not counted.
    pub row: usize,
    /// The rejected row keyed by header name, with header names and cell
    /// values trimmed of surrounding whitespace. Empty cells are kept as `""`.
    pub data: BTreeMap<String, String>,
    pub error: String,
}

/// Column contract of a data kind, as served to clients building CSV templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSet {
    pub kind: DataKind,
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_serializes_to_the_wire_shape() {
        let mut data = BTreeMap::new();
        data.insert("tagNumber".to_string(), String::new());
        let result = ImportResult {
            success: 1,
            failed: 1,
            errors: vec![RowError {
                row: 2,
                data,
                error: "Missing required field 'tagNumber'".to_string(),
            }],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], 1);
        assert_eq!(json["failed"], 1);
        assert_eq!(json["errors"][0]["row"], 2);
        assert_eq!(json["errors"][0]["data"]["tagNumber"], "");
        assert_eq!(result.total(), 2);
    }
}
