//! Reminder endpoints.

use domain::models::reminder::{Reminder, ReminderCreate, ReminderUpdate, SnoozeRequest};
use serde::de::IgnoredAny;
use uuid::Uuid;

use super::api_client::{ApiClient, ApiClientError, with_query};

/// Window used by the dashboard's "upcoming" list
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

#[derive(Debug, Clone)]
pub struct ReminderService {
    client: ApiClient,
}

impl ReminderService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Reminder>, ApiClientError> {
        self.client.get("/reminders").await
    }

    /// Enabled reminders due within `days`
    pub async fn upcoming(&self, days: u32) -> Result<Vec<Reminder>, ApiClientError> {
        self.client
            .get(&with_query("/reminders/upcoming", &[("days", days.to_string())]))
            .await
    }

    pub async fn overdue(&self) -> Result<Vec<Reminder>, ApiClientError> {
        self.client.get("/reminders/overdue").await
    }

    pub async fn get(&self, reminder_id: Uuid) -> Result<Reminder, ApiClientError> {
        self.client.get(&format!("/reminders/{}", reminder_id)).await
    }

    pub async fn create(&self, data: &ReminderCreate) -> Result<Reminder, ApiClientError> {
        self.client.post("/reminders", data).await
    }

    pub async fn update(&self, reminder_id: Uuid, data: &ReminderUpdate) -> Result<Reminder, ApiClientError> {
        self.client.put(&format!("/reminders/{}", reminder_id), data).await
    }

    pub async fn delete(&self, reminder_id: Uuid) -> Result<(), ApiClientError> {
        let _: IgnoredAny = self.client.delete(&format!("/reminders/{}", reminder_id)).await?;
        Ok(())
    }

    pub async fn complete(&self, reminder_id: Uuid) -> Result<(), ApiClientError> {
        let _: IgnoredAny = self
            .client
            .post_empty(&format!("/reminders/{}/complete", reminder_id))
            .await?;
        Ok(())
    }

    /// Push the reminder's next due time `hours` into the future
    pub async fn snooze(&self, reminder_id: Uuid, hours: u32) -> Result<Reminder, ApiClientError> {
        self.client
            .post(
                &format!("/reminders/{}/snooze", reminder_id),
                &SnoozeRequest { snooze_hours: hours },
            )
            .await
    }
}
