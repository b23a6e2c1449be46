use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Kind of care a plant received
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum CareEventType {
    Watered,
    Fertilized,
    Repotted,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareEvent {
    pub id: Uuid,
    // The care-events endpoints are nested under the plant, so the backend
    // may leave the owner out of the body.
    #[serde(default)]
    pub plant_id: Option<Uuid>,
    pub event_type: CareEventType,
    pub event_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareEventCreate {
    pub event_type: CareEventType,
    pub event_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CareEventCreate {
    /// Build a care event, stamping it with the current time when no date is given
    pub fn new(event_type: CareEventType, notes: Option<String>, event_date: Option<DateTime<Utc>>) -> Self {
        Self {
            event_type,
            event_date: event_date.unwrap_or_else(Utc::now),
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_event_type_wire_format() {
        let json = serde_json::to_string(&CareEventType::Fertilized).unwrap();
        assert_eq!(json, "\"FERTILIZED\"");
        assert_eq!(CareEventType::from_str("watered").unwrap(), CareEventType::Watered);
    }

    #[test]
    fn test_create_defaults_date_to_now() {
        let before = Utc::now();
        let event = CareEventCreate::new(CareEventType::Watered, None, None);
        assert!(event.event_date >= before);
        assert!(event.event_date <= Utc::now());

        let body = serde_json::to_value(&event).unwrap();
        assert!(body.get("notes").is_none());
    }
}
