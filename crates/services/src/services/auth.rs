//! Authentication endpoints. Stateless; `AuthStore` owns the session side.

use domain::models::auth::{LoginRequest, SetupRequest, SetupResponse, TokenResponse};

use super::api_client::{ApiClient, ApiClientError};

#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.client.post("/auth/login", &body).await
    }

    /// Create the single account on a fresh backend
    pub async fn setup(&self, username: &str, password: &str) -> Result<SetupResponse, ApiClientError> {
        let body = SetupRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.client.post("/auth/setup", &body).await
    }

    /// Trade the current (still valid) token for a fresh one
    pub async fn refresh(&self) -> Result<TokenResponse, ApiClientError> {
        self.client.post_empty("/auth/refresh").await
    }
}
