use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Plant organ shown in an identification photo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Organ {
    #[default]
    Leaf,
    Flower,
    Fruit,
    Bark,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentificationResult {
    pub score: f64,
    pub scientific_name: String,
    #[serde(default)]
    pub common_names: Vec<String>,
    pub family: String,
    pub genus: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IdentifyResponse {
    #[serde(default)]
    pub results: Vec<IdentificationResult>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub remaining_identifications: Option<u32>,
}

impl IdentifyResponse {
    pub fn best_match(&self) -> Option<&IdentificationResult> {
        self.results
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}
