use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// PlantNet identification settings. The key itself is never echoed back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlantNetSettings {
    #[serde(default)]
    pub api_key_configured: bool,
    #[serde(default)]
    pub api_key_preview: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlantNetSettingsUpdate {
    /// Empty string clears the stored key
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderSettings {
    pub default_watering_interval: Option<u32>,
    pub default_fertilizing_interval: Option<u32>,
    pub preferred_reminder_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReminderSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_watering_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_fertilizing_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_reminder_time: Option<NaiveTime>,
}
