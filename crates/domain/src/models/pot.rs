use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::photo::Photo;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pot {
    pub id: Uuid,
    pub name: String,
    pub diameter_cm: f64,
    pub height_cm: f64,
    #[serde(default)]
    pub primary_photo_url: Option<String>,
    /// Read-only projection of `Plant::pot_id`
    #[serde(default)]
    pub plant_id: Option<Uuid>,
    #[serde(default)]
    pub plant_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Pot {
    pub fn is_assigned(&self) -> bool {
        self.plant_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PotDetail {
    #[serde(flatten)]
    pub pot: Pot,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl std::ops::Deref for PotDetail {
    type Target = Pot;
    fn deref(&self) -> &Self::Target {
        &self.pot
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PotCreate {
    pub name: String,
    pub diameter_cm: f64,
    pub height_cm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PotUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
}
