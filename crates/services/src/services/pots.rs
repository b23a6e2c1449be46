//! Pot endpoints. Assignment is changed through the plant, see `pot_assignment`.

use domain::models::{
    photo::{FileUpload, Photo},
    pot::{Pot, PotCreate, PotDetail, PotUpdate},
};
use serde::de::IgnoredAny;
use uuid::Uuid;

use super::api_client::{ApiClient, ApiClientError, file_form, with_query};

#[derive(Debug, Clone)]
pub struct PotService {
    client: ApiClient,
}

impl PotService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Pot>, ApiClientError> {
        self.client.get("/pots").await
    }

    /// Pots no plant currently points at
    pub async fn list_available(&self) -> Result<Vec<Pot>, ApiClientError> {
        self.client.get("/pots/available").await
    }

    pub async fn get(&self, pot_id: Uuid) -> Result<PotDetail, ApiClientError> {
        self.client.get(&format!("/pots/{}", pot_id)).await
    }

    pub async fn create(&self, data: &PotCreate) -> Result<Pot, ApiClientError> {
        self.client.post("/pots", data).await
    }

    pub async fn update(&self, pot_id: Uuid, data: &PotUpdate) -> Result<Pot, ApiClientError> {
        self.client.put(&format!("/pots/{}", pot_id), data).await
    }

    pub async fn delete(&self, pot_id: Uuid) -> Result<(), ApiClientError> {
        let _: IgnoredAny = self.client.delete(&format!("/pots/{}", pot_id)).await?;
        Ok(())
    }

    pub async fn upload_photo(
        &self,
        pot_id: Uuid,
        file: FileUpload,
        is_primary: bool,
    ) -> Result<Photo, ApiClientError> {
        let path = with_query(
            &format!("/pots/{}/photos", pot_id),
            &[("is_primary", is_primary.to_string())],
        );
        self.client.post_multipart(&path, file_form("file", file)?).await
    }
}
