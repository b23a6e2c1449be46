//! Account-wide settings endpoints.

use domain::models::settings::{
    PlantNetSettings, PlantNetSettingsUpdate, ReminderSettings, ReminderSettingsUpdate,
};

use super::api_client::{ApiClient, ApiClientError};

#[derive(Debug, Clone)]
pub struct SettingsService {
    client: ApiClient,
}

impl SettingsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn plantnet(&self) -> Result<PlantNetSettings, ApiClientError> {
        self.client.get("/settings/plantnet").await
    }

    pub async fn update_plantnet(
        &self,
        data: &PlantNetSettingsUpdate,
    ) -> Result<PlantNetSettings, ApiClientError> {
        self.client.put("/settings/plantnet", data).await
    }

    pub async fn reminders(&self) -> Result<ReminderSettings, ApiClientError> {
        self.client.get("/settings/reminders").await
    }

    /// Update reminder defaults; the backend recalculates every reminder afterwards
    pub async fn update_reminders(
        &self,
        data: &ReminderSettingsUpdate,
    ) -> Result<ReminderSettings, ApiClientError> {
        self.client.put("/settings/reminders", data).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use serde_json::json;

    use super::*;
    use crate::services::{
        mock_backend::{MockBackend, MockResponse},
        session::Session,
    };

    #[tokio::test]
    async fn test_plantnet_round_trip() {
        let backend = MockBackend::start().await;
        backend.on(
            "GET",
            "/settings/plantnet",
            MockResponse::json(200, json!({ "api_key_configured": false })),
        );
        backend.on(
            "PUT",
            "/settings/plantnet",
            MockResponse::json(200, json!({ "api_key_configured": true, "api_key_preview": "2b10…9f" })),
        );

        let svc = SettingsService::new(ApiClient::new(backend.base_url(), Session::with_token("t")).unwrap());
        assert!(!svc.plantnet().await.unwrap().api_key_configured);

        let updated = svc
            .update_plantnet(&PlantNetSettingsUpdate {
                api_key: "2b10abcdef9f".to_string(),
            })
            .await
            .unwrap();
        assert!(updated.api_key_configured);
        assert_eq!(backend.requests()[1].json(), json!({ "api_key": "2b10abcdef9f" }));
    }

    #[tokio::test]
    async fn test_reminder_settings_partial_update() {
        let backend = MockBackend::start().await;
        backend.on(
            "PUT",
            "/settings/reminders",
            MockResponse::json(
                200,
                json!({
                    "default_watering_interval": 5,
                    "default_fertilizing_interval": null,
                    "preferred_reminder_time": "07:30:00"
                }),
            ),
        );

        let svc = SettingsService::new(ApiClient::new(backend.base_url(), Session::with_token("t")).unwrap());
        let settings = svc
            .update_reminders(&ReminderSettingsUpdate {
                default_watering_interval: Some(5),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(settings.preferred_reminder_time, NaiveTime::from_hms_opt(7, 30, 0).unwrap());
        assert_eq!(backend.requests()[0].json(), json!({ "default_watering_interval": 5 }));
    }
}
