//! Azure AD access token acquisition
//!
//! The shipped provider runs the OAuth2 client-credentials flow against the
//! tenant's token endpoint and caches the token until shortly before expiry,
//! so one audit run authenticates at most once.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::api_clients::ApiError;
use crate::config::AzureConfig;

/// Renew this long before the token actually expires.
const EXPIRY_SKEW_SECONDS: i64 = 60;

/// Source of bearer tokens for management API calls.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, ApiError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Client-credentials token provider for a service principal.
pub struct ClientCredentialsProvider {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl ClientCredentialsProvider {
    pub fn new(config: &AzureConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("custodia/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            token_url: format!(
                "{}/{}/oauth2/v2.0/token",
                config.authority.trim_end_matches('/'),
                config.tenant_id
            ),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scope: format!("{}/.default", config.management_url.trim_end_matches('/')),
            cached: Mutex::new(None),
        })
    }

    async fn request_token(&self) -> Result<CachedToken, ApiError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", self.scope.as_str()),
        ];

        let response = self.http.post(&self.token_url).form(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Auth(format!(
                "token endpoint returned HTTP {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("token response: {}", e)))?;

        Ok(CachedToken {
            token: token.access_token,
            expires_at: Utc::now()
                + chrono::Duration::seconds((token.expires_in - EXPIRY_SKEW_SECONDS).max(0)),
        })
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsProvider {
    async fn access_token(&self) -> Result<String, ApiError> {
        let mut cached = self.cached.lock().await;

        if let Some(existing) = cached.as_ref() {
            if existing.expires_at > Utc::now() {
                return Ok(existing.token.clone());
            }
        }

        let fresh = self.request_token().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);

        tracing::debug!("Acquired management API access token");
        Ok(token)
    }
}

/// Provider that always returns a pre-acquired token. Useful when the token
/// comes from the surrounding environment (CI, local tooling) and in tests.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, ApiError> {
        Ok(self.token.clone())
    }
}
