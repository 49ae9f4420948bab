use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The record kinds that can be bulk imported from (and exported to) CSV.
///
/// Each kind is addressed in the HTTP API by its slug, e.g.
/// `POST /api/import/calving-records`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataKind {
    Animals,
    Properties,
    Fields,
    Vaccinations,
    Events,
    CalvingRecords,
    SlaughterRecords,
}

impl DataKind {
    pub const ALL: [DataKind; 7] = [
        DataKind::Animals,
        DataKind::Properties,
        DataKind::Fields,
        DataKind::Vaccinations,
        DataKind::Events,
        DataKind::CalvingRecords,
        DataKind::SlaughterRecords,
    ];

    /// URL slug used in the API paths.
    pub fn slug(&self) -> &'static str {
        match self {
            DataKind::Animals => "animals",
            DataKind::Properties => "properties",
            DataKind::Fields => "fields",
            DataKind::Vaccinations => "vaccinations",
            DataKind::Events => "events",
            DataKind::CalvingRecords => "calving-records",
            DataKind::SlaughterRecords => "slaughter-records",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip_through_from_str() {
        for kind in DataKind::ALL {
            assert_eq!(kind.slug().parse::<DataKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_slug_is_rejected() {
        assert_eq!("cows".parse::<DataKind>(), Err("cows".to_string()));
        assert!("Animals".parse::<DataKind>().is_err());
    }
}
