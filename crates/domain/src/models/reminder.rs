use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum ReminderType {
    Watering,
    Fertilizing,
}

impl ReminderType {
    /// Lowercase label used in views
    pub fn label(&self) -> &'static str {
        match self {
            ReminderType::Watering => "watering",
            ReminderType::Fertilizing => "fertilizing",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum FrequencyType {
    Daily,
    Interval,
    Weekly,
    SpecificDays,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reminder {
    pub id: Uuid,
    pub plant_id: Uuid,
    #[serde(default)]
    pub plant_name: Option<String>,
    pub reminder_type: ReminderType,
    #[serde(default)]
    pub frequency_type: Option<FrequencyType>,
    #[serde(default)]
    pub frequency_value: Option<u32>,
    #[serde(default)]
    pub specific_days: Option<Vec<u8>>,
    #[serde(default)]
    pub preferred_time: Option<NaiveTime>,
    pub is_enabled: bool,
    /// Month numbers (1-12) bounding the dormancy window
    #[serde(default)]
    pub dormant_start: Option<u8>,
    #[serde(default)]
    pub dormant_end: Option<u8>,
    pub next_due: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Reminder {
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.next_due < now
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderCreate {
    pub plant_id: Uuid,
    pub reminder_type: ReminderType,
    pub frequency_type: FrequencyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_value: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_days: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dormant_start: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dormant_end: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReminderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_type: Option<FrequencyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_value: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_days: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dormant_start: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dormant_end: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SnoozeRequest {
    pub snooze_hours: u32,
}

impl Default for SnoozeRequest {
    fn default() -> Self {
        Self { snooze_hours: 24 }
    }
}
