//! Web push subscription endpoints.

use domain::models::push::PushSubscription;
use serde::de::IgnoredAny;

use super::api_client::{ApiClient, ApiClientError, with_query};

#[derive(Debug, Clone)]
pub struct PushService {
    client: ApiClient,
}

impl PushService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn subscribe(&self, subscription: &PushSubscription) -> Result<(), ApiClientError> {
        let _: IgnoredAny = self.client.post("/push/subscribe", subscription).await?;
        Ok(())
    }

    pub async fn unsubscribe(&self, endpoint: &str) -> Result<(), ApiClientError> {
        let _: IgnoredAny = self
            .client
            .delete(&with_query("/push/subscribe", &[("endpoint", endpoint)]))
            .await?;
        Ok(())
    }
}
