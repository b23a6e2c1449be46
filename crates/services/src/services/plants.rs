//! Plant, plant photo and care-event endpoints.

use chrono::{DateTime, Utc};
use domain::models::{
    care_event::{CareEvent, CareEventCreate, CareEventType},
    photo::{FileUpload, Photo},
    plant::{Plant, PlantCreate, PlantDetail, PlantListQuery, PlantUpdate},
};
use reqwest::multipart::Form;
use serde::de::IgnoredAny;
use uuid::Uuid;

use super::api_client::{ApiClient, ApiClientError, file_form, with_query};

#[derive(Debug, Clone)]
pub struct PlantService {
    client: ApiClient,
}

impl PlantService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &PlantListQuery) -> Result<Vec<Plant>, ApiClientError> {
        self.client.get(&with_query("/plants", &query.pairs())).await
    }

    pub async fn get(&self, plant_id: Uuid) -> Result<PlantDetail, ApiClientError> {
        self.client.get(&format!("/plants/{}", plant_id)).await
    }

    pub async fn create(&self, data: &PlantCreate) -> Result<Plant, ApiClientError> {
        self.client.post("/plants", data).await
    }

    pub async fn update(&self, plant_id: Uuid, data: &PlantUpdate) -> Result<Plant, ApiClientError> {
        self.client.put(&format!("/plants/{}", plant_id), data).await
    }

    pub async fn delete(&self, plant_id: Uuid) -> Result<(), ApiClientError> {
        let _: IgnoredAny = self.client.delete(&format!("/plants/{}", plant_id)).await?;
        Ok(())
    }

    pub async fn upload_photo(
        &self,
        plant_id: Uuid,
        file: FileUpload,
        is_primary: bool,
    ) -> Result<Photo, ApiClientError> {
        let mut form: Form = file_form("file", file)?;
        if is_primary {
            form = form.text("is_primary", "true");
        }
        let path = with_query(
            &format!("/plants/{}/photos", plant_id),
            &[("is_primary", is_primary.to_string())],
        );
        self.client.post_multipart(&path, form).await
    }

    pub async fn delete_photo(&self, plant_id: Uuid, photo_id: Uuid) -> Result<(), ApiClientError> {
        let _: IgnoredAny = self
            .client
            .delete(&format!("/plants/{}/photos/{}", plant_id, photo_id))
            .await?;
        Ok(())
    }

    pub async fn set_primary_photo(&self, plant_id: Uuid, photo_id: Uuid) -> Result<(), ApiClientError> {
        let _: IgnoredAny = self
            .client
            .post_empty(&format!("/plants/{}/photos/{}/primary", plant_id, photo_id))
            .await?;
        Ok(())
    }

    /// Log care for a plant; `event_date` defaults to now
    pub async fn record_care_event(
        &self,
        plant_id: Uuid,
        event_type: CareEventType,
        notes: Option<String>,
        event_date: Option<DateTime<Utc>>,
    ) -> Result<CareEvent, ApiClientError> {
        let body = CareEventCreate::new(event_type, notes, event_date);
        self.client
            .post(&format!("/plants/{}/care-events", plant_id), &body)
            .await
    }

    pub async fn care_history(
        &self,
        plant_id: Uuid,
        event_type: Option<CareEventType>,
    ) -> Result<Vec<CareEvent>, ApiClientError> {
        let filter: Vec<(&str, String)> = event_type
            .map(|t| vec![("event_type", t.to_string())])
            .unwrap_or_default();
        self.client
            .get(&with_query(&format!("/plants/{}/care-events", plant_id), &filter))
            .await
    }

    pub async fn delete_care_event(&self, plant_id: Uuid, event_id: Uuid) -> Result<(), ApiClientError> {
        let _: IgnoredAny = self
            .client
            .delete(&format!("/plants/{}/care-events/{}", plant_id, event_id))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use domain::models::plant::{PlantSort, SortOrder};
    use serde_json::json;

    use super::*;
    use crate::services::{
        mock_backend::{MockBackend, MockResponse},
        session::Session,
    };

    fn service(backend: &MockBackend) -> PlantService {
        PlantService::new(ApiClient::new(backend.base_url(), Session::with_token("t")).unwrap())
    }

    fn plant_json(id: Uuid, pot_id: Option<Uuid>) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Monstera",
            "species": "Monstera deliciosa",
            "pot_id": pot_id,
            "primary_photo_url": null,
            "created_at": "2026-01-01T00:00:00Z",
            "updated_at": "2026-01-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_list_builds_query_string() {
        let backend = MockBackend::start().await;
        let id = Uuid::new_v4();
        backend.on(
            "GET",
            "/plants?sort=species&order=desc&search=fern",
            MockResponse::json(200, json!([plant_json(id, None)])),
        );
        backend.on("GET", "/plants", MockResponse::json(200, json!([])));

        let plants = service(&backend)
            .list(&PlantListQuery {
                sort: Some(PlantSort::Species),
                order: Some(SortOrder::Desc),
                search: Some("fern".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(plants.len(), 1);
        assert_eq!(plants[0].id, id);

        let none = service(&backend).list(&PlantListQuery::default()).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_get_detail_with_photos() {
        let backend = MockBackend::start().await;
        let id = Uuid::new_v4();
        let mut detail = plant_json(id, None);
        detail["photos"] = json!([{
            "id": Uuid::new_v4(),
            "url": "/uploads/a.jpg",
            "is_primary": true,
            "uploaded_at": "2026-01-02T00:00:00Z"
        }]);
        detail["last_watered"] = json!("2026-02-10T12:00:00Z");
        backend.on("GET", &format!("/plants/{}", id), MockResponse::json(200, detail));

        let plant = service(&backend).get(id).await.unwrap();
        assert_eq!(plant.name, "Monstera");
        assert_eq!(plant.photos.len(), 1);
        assert!(plant.last_watered.is_some());
        assert!(plant.reminders.is_empty());
    }

    #[tokio::test]
    async fn test_update_sends_explicit_null_pot() {
        let backend = MockBackend::start().await;
        let id = Uuid::new_v4();
        backend.on("PUT", &format!("/plants/{}", id), MockResponse::json(200, plant_json(id, None)));

        service(&backend).update(id, &PlantUpdate::pot(None)).await.unwrap();

        let put = &backend.requests_for("PUT")[0];
        assert_eq!(put.json(), json!({ "pot_id": null }));
    }

    #[tokio::test]
    async fn test_record_care_event_with_explicit_date() {
        let backend = MockBackend::start().await;
        let plant_id = Uuid::new_v4();
        let path = format!("/plants/{}/care-events", plant_id);
        backend.on(
            "POST",
            &path,
            MockResponse::json(
                201,
                json!({
                    "id": Uuid::new_v4(),
                    "event_type": "WATERED",
                    "event_date": "2026-03-01T08:00:00Z",
                    "notes": "deep soak",
                    "created_at": "2026-03-01T08:00:01Z"
                }),
            ),
        );

        let date = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let event = service(&backend)
            .record_care_event(plant_id, CareEventType::Watered, Some("deep soak".to_string()), Some(date))
            .await
            .unwrap();
        assert_eq!(event.event_type, CareEventType::Watered);
        assert_eq!(event.plant_id, None);

        let body = backend.requests()[0].json();
        assert_eq!(body["event_type"], "WATERED");
        assert_eq!(body["notes"], "deep soak");
        let sent: DateTime<Utc> = serde_json::from_value(body["event_date"].clone()).unwrap();
        assert_eq!(sent, date);
    }

    #[tokio::test]
    async fn test_care_history_filter_and_delete() {
        let backend = MockBackend::start().await;
        let plant_id = Uuid::new_v4();
        let event_id = Uuid::new_v4();
        backend.on(
            "GET",
            &format!("/plants/{}/care-events?event_type=FERTILIZED", plant_id),
            MockResponse::json(200, json!([])),
        );
        backend.on(
            "DELETE",
            &format!("/plants/{}/care-events/{}", plant_id, event_id),
            MockResponse::no_content(),
        );

        let svc = service(&backend);
        let history = svc
            .care_history(plant_id, Some(CareEventType::Fertilized))
            .await
            .unwrap();
        assert!(history.is_empty());
        svc.delete_care_event(plant_id, event_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_primary_photo() {
        let backend = MockBackend::start().await;
        let plant_id = Uuid::new_v4();
        backend.on(
            "POST",
            &format!("/plants/{}/photos?is_primary=true", plant_id),
            MockResponse::json(
                200,
                json!({ "id": Uuid::new_v4(), "url": "/uploads/p.jpg", "is_primary": true, "uploaded_at": null }),
            ),
        );

        let photo = service(&backend)
            .upload_photo(plant_id, FileUpload::new("p.jpg", "image/jpeg", vec![0xff, 0xd8]), true)
            .await
            .unwrap();
        assert!(photo.is_primary);

        let request = &backend.requests()[0];
        let body = String::from_utf8_lossy(&request.body);
        assert!(body.contains("name=\"file\"; filename=\"p.jpg\""));
        assert!(body.contains("name=\"is_primary\""));
    }

    #[tokio::test]
    async fn test_delete_propagates_backend_message() {
        let backend = MockBackend::start().await;
        let plant_id = Uuid::new_v4();
        backend.on(
            "DELETE",
            &format!("/plants/{}", plant_id),
            MockResponse::json(404, json!({ "detail": { "code": "NOT_FOUND", "message": "Plant not found" } })),
        );

        let err = service(&backend).delete(plant_id).await.unwrap_err();
        assert_eq!(err.to_string(), "Plant not found");
    }
}
