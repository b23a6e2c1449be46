//! Species identification from a photo.

use domain::models::{
    identification::{IdentifyResponse, Organ},
    photo::FileUpload,
};

use super::api_client::{ApiClient, ApiClientError, file_form};

#[derive(Debug, Clone)]
pub struct IdentifyService {
    client: ApiClient,
}

impl IdentifyService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn identify(&self, image: FileUpload, organ: Organ) -> Result<IdentifyResponse, ApiClientError> {
        let form = file_form("image", image)?.text("organ", organ.to_string());
        self.client.post_multipart("/identify", form).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::services::{
        mock_backend::{MockBackend, MockResponse},
        session::Session,
    };

    #[tokio::test]
    async fn test_identify_returns_candidates() {
        let backend = MockBackend::start().await;
        backend.on(
            "POST",
            "/identify",
            MockResponse::json(
                200,
                json!({
                    "results": [
                        { "score": 0.12, "scientific_name": "Philodendron hederaceum", "family": "Araceae", "genus": "Philodendron" },
                        { "score": 0.81, "scientific_name": "Monstera deliciosa", "common_names": ["Swiss cheese plant"], "family": "Araceae", "genus": "Monstera" }
                    ],
                    "remaining_identifications": 498
                }),
            ),
        );

        let svc = IdentifyService::new(ApiClient::new(backend.base_url(), Session::with_token("t")).unwrap());
        let response = svc
            .identify(FileUpload::new("leaf.jpg", "image/jpeg", vec![1, 2, 3]), Organ::Flower)
            .await
            .unwrap();

        assert_eq!(response.best_match().unwrap().scientific_name, "Monstera deliciosa");
        assert_eq!(response.remaining_identifications, Some(498));

        let body = String::from_utf8_lossy(&backend.requests()[0].body).to_string();
        assert!(body.contains("name=\"organ\""));
        assert!(body.contains("flower"));
    }
}
