use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Production type of an animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimalType {
    Dairy,
    Beef,
}

impl AnimalType {
    /// Accepted CSV spellings, matched exactly.
    pub const VALUES: &'static [&'static str] = &["dairy", "beef"];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalType::Dairy => "dairy",
            AnimalType::Beef => "beef",
        }
    }
}

impl FromStr for AnimalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dairy" => Ok(AnimalType::Dairy),
            "beef" => Ok(AnimalType::Beef),
            other => Err(format!("unknown animal type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const VALUES: &'static [&'static str] = &["male", "female"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(format!("unknown sex '{}'", other)),
        }
    }
}

/// How an animal was conceived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreedingMethod {
    LiveCover,
    Ai,
}

impl BreedingMethod {
    pub const VALUES: &'static [&'static str] = &["live-cover", "ai"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BreedingMethod::LiveCover => "live-cover",
            BreedingMethod::Ai => "ai",
        }
    }
}

impl FromStr for BreedingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "live-cover" => Ok(BreedingMethod::LiveCover),
            "ai" => Ok(BreedingMethod::Ai),
            other => Err(format!("unknown breeding method '{}'", other)),
        }
    }
}

/// A persisted animal.
///
/// `tag_number` is the natural key other records refer to in CSV files;
/// `sire_id` and `dam_id` hold surrogate IDs of other animals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: String,
    pub tag_number: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub animal_type: AnimalType,
    pub sex: Sex,
    pub date_of_birth: Option<NaiveDate>,
    pub breeding_method: Option<BreedingMethod>,
    pub sire_id: Option<String>,
    pub dam_id: Option<String>,
    pub herd_name: Option<String>,
    pub organic: bool,
}
