//! Azure Resource Manager API client
//!
//! Implements both audit collaborators against the ARM REST surface:
//! subscription listing, `Microsoft.Web/sites` enumeration, and the per-site
//! backup configuration and backup history endpoints. List responses are
//! drained through `nextLink` pagination before being returned.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApiError, BackupProvider, SubscriptionDirectory};
use crate::config::AzureConfig;
use crate::domain::{
    AppIdentity, AttemptStatus, BackupAttempt, BackupConfiguration, BackupEnablement, Subscription,
};
use crate::infrastructure::auth::AccessTokenProvider;

const SUBSCRIPTIONS_API_VERSION: &str = "2022-12-01";
const WEB_API_VERSION: &str = "2023-12-01";

/// One page of an ARM list response.
#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
    #[serde(rename = "nextLink")]
    next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionEntry {
    #[serde(rename = "subscriptionId")]
    subscription_id: String,
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct SiteEntry {
    name: String,
    properties: SiteProperties,
}

#[derive(Debug, Deserialize)]
struct SiteProperties {
    #[serde(rename = "resourceGroup")]
    resource_group: String,
}

#[derive(Debug, Deserialize)]
struct BackupConfigEnvelope {
    properties: BackupConfigProperties,
}

#[derive(Debug, Deserialize)]
struct BackupConfigProperties {
    enabled: Option<bool>,
    #[serde(rename = "backupSchedule")]
    backup_schedule: Option<BackupSchedule>,
}

#[derive(Debug, Deserialize)]
struct BackupSchedule {
    #[serde(rename = "retentionPeriodInDays")]
    retention_period_in_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct BackupItemEntry {
    properties: BackupItemProperties,
}

#[derive(Debug, Deserialize)]
struct BackupItemProperties {
    status: Option<String>,
    created: Option<DateTime<Utc>>,
    #[serde(rename = "finishedTimeStamp")]
    finished_time_stamp: Option<DateTime<Utc>>,
}

/// Client for the Azure Resource Manager REST API.
pub struct AzureResourceClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl AzureResourceClient {
    pub fn new(
        config: &AzureConfig,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("custodia/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.management_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Issue one authenticated request and deserialize the JSON body.
    /// Returns `Ok(None)` on HTTP 404 so callers can treat absence as data.
    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
    ) -> Result<Option<T>, ApiError> {
        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .request(method, url)
            .bearer_auth(token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status,
                message: arm_error_message(&body),
            });
        }

        let body = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("{}: {}", url, e)))?;
        Ok(Some(body))
    }

    /// Fetch every page of an ARM list endpoint, following `nextLink`.
    async fn get_all_pages<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut next = Some(url.to_string());

        while let Some(url) = next {
            let page: Page<T> = self
                .request_json(Method::GET, &url)
                .await?
                .ok_or_else(|| ApiError::Http {
                    status: 404,
                    message: format!("{} not found", url),
                })?;

            items.extend(page.value);
            next = page.next_link;
        }

        Ok(items)
    }

    fn site_url(&self, subscription: &Subscription, app: &AppIdentity, suffix: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Web/sites/{}/{}?api-version={}",
            self.base_url, subscription.id, app.resource_group, app.name, suffix, WEB_API_VERSION
        )
    }
}

/// Pull the human-readable message out of an ARM error envelope, falling
/// back to the raw body.
fn arm_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            let error = v.get("error")?;
            let code = error.get("code")?.as_str()?;
            let message = error.get("message").and_then(|m| m.as_str()).unwrap_or("");
            Some(format!("{}: {}", code, message))
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl SubscriptionDirectory for AzureResourceClient {
    async fn resolve_subscription(&self, name: &str) -> Result<Option<Subscription>, ApiError> {
        let url = format!(
            "{}/subscriptions?api-version={}",
            self.base_url, SUBSCRIPTIONS_API_VERSION
        );
        let entries: Vec<SubscriptionEntry> = self.get_all_pages(&url).await?;

        Ok(entries
            .into_iter()
            .find(|e| e.display_name == name)
            .map(|e| Subscription {
                name: e.display_name,
                id: e.subscription_id,
            }))
    }

    async fn list_apps(&self, subscription: &Subscription) -> Result<Vec<AppIdentity>, ApiError> {
        let url = format!(
            "{}/subscriptions/{}/providers/Microsoft.Web/sites?api-version={}",
            self.base_url, subscription.id, WEB_API_VERSION
        );
        let sites: Vec<SiteEntry> = self.get_all_pages(&url).await?;

        Ok(sites
            .into_iter()
            .map(|s| AppIdentity {
                resource_group: s.properties.resource_group,
                name: s.name,
            })
            .collect())
    }
}

#[async_trait]
impl BackupProvider for AzureResourceClient {
    async fn backup_configuration(
        &self,
        subscription: &Subscription,
        app: &AppIdentity,
    ) -> Result<BackupConfiguration, ApiError> {
        // The /list POST variant returns the configuration including its
        // storage credentials; 404 is the normal "never configured" state.
        let url = self.site_url(subscription, app, "config/backup/list");
        let envelope: Option<BackupConfigEnvelope> =
            self.request_json(Method::POST, &url).await?;

        Ok(match envelope {
            Some(envelope) => BackupConfiguration {
                enablement: BackupEnablement::from_provider_flag(envelope.properties.enabled),
                retention_days: envelope
                    .properties
                    .backup_schedule
                    .and_then(|s| s.retention_period_in_days),
            },
            None => BackupConfiguration::not_configured(),
        })
    }

    async fn list_backup_attempts(
        &self,
        subscription: &Subscription,
        app: &AppIdentity,
    ) -> Result<Vec<BackupAttempt>, ApiError> {
        let url = self.site_url(subscription, app, "backups");
        let items: Vec<BackupItemEntry> = self.get_all_pages(&url).await?;

        let attempts = items
            .into_iter()
            .filter_map(|item| {
                let props = item.properties;
                let Some(created_at) = props.created else {
                    tracing::warn!(app = %app, "Skipping backup item without a creation timestamp");
                    return None;
                };
                Some(BackupAttempt {
                    created_at,
                    finished_at: props.finished_time_stamp,
                    status: AttemptStatus::parse(props.status.as_deref().unwrap_or("Unknown")),
                })
            })
            .collect();

        Ok(attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::auth::StaticTokenProvider;

    fn client(base_url: String) -> AzureResourceClient {
        let config = AzureConfig {
            authority: "https://login.microsoftonline.com".to_string(),
            management_url: base_url,
            tenant_id: "tenant".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            timeout_seconds: 5,
        };
        AzureResourceClient::new(&config, Arc::new(StaticTokenProvider::new("test-token")))
            .expect("client should build")
    }

    fn subscription() -> Subscription {
        Subscription {
            name: "Production".to_string(),
            id: "sub-1".to_string(),
        }
    }

    fn app() -> AppIdentity {
        AppIdentity {
            resource_group: "rg-web".to_string(),
            name: "storefront".to_string(),
        }
    }

    #[tokio::test]
    async fn resolve_subscription_matches_display_name_exactly() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("GET", "/subscriptions?api-version=2022-12-01")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"value":[
                    {"subscriptionId":"sub-1","displayName":"Production"},
                    {"subscriptionId":"sub-2","displayName":"Staging"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = client(server.url());

        let resolved = client.resolve_subscription("Staging").await.unwrap();
        assert_eq!(
            resolved,
            Some(Subscription {
                name: "Staging".to_string(),
                id: "sub-2".to_string(),
            })
        );

        let missing = client.resolve_subscription("staging").await.unwrap();
        assert!(missing.is_none(), "match must be exact, not case-folded");
    }

    #[tokio::test]
    async fn list_apps_drains_next_link_pagination() {
        let mut server = mockito::Server::new_async().await;

        let page_two = format!("{}/page-two", server.url());
        server
            .mock(
                "GET",
                "/subscriptions/sub-1/providers/Microsoft.Web/sites?api-version=2023-12-01",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(
                r#"{{"value":[{{"name":"storefront","properties":{{"resourceGroup":"rg-web"}}}}],"nextLink":"{}"}}"#,
                page_two
            ))
            .create_async()
            .await;
        server
            .mock("GET", "/page-two")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value":[{"name":"api","properties":{"resourceGroup":"rg-api"}}]}"#)
            .create_async()
            .await;

        let apps = client(server.url()).list_apps(&subscription()).await.unwrap();

        assert_eq!(
            apps,
            vec![
                AppIdentity {
                    resource_group: "rg-web".to_string(),
                    name: "storefront".to_string(),
                },
                AppIdentity {
                    resource_group: "rg-api".to_string(),
                    name: "api".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn missing_backup_configuration_maps_to_not_configured() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock(
                "POST",
                "/subscriptions/sub-1/resourceGroups/rg-web/providers/Microsoft.Web/sites/storefront/config/backup/list?api-version=2023-12-01",
            )
            .with_status(404)
            .with_body(r#"{"error":{"code":"NotFound"}}"#)
            .create_async()
            .await;

        let config = client(server.url())
            .backup_configuration(&subscription(), &app())
            .await
            .unwrap();

        assert_eq!(config, BackupConfiguration::not_configured());
        assert!(config.retention_days.is_none());
    }

    #[tokio::test]
    async fn backup_configuration_parses_enablement_and_retention() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock(
                "POST",
                "/subscriptions/sub-1/resourceGroups/rg-web/providers/Microsoft.Web/sites/storefront/config/backup/list?api-version=2023-12-01",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"properties":{"enabled":true,"backupSchedule":{"retentionPeriodInDays":30}}}"#,
            )
            .create_async()
            .await;

        let config = client(server.url())
            .backup_configuration(&subscription(), &app())
            .await
            .unwrap();

        assert_eq!(config.enablement, BackupEnablement::Enabled);
        assert_eq!(config.retention_days, Some(30));
    }

    #[tokio::test]
    async fn backup_attempts_parse_timestamps_and_statuses() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock(
                "GET",
                "/subscriptions/sub-1/resourceGroups/rg-web/providers/Microsoft.Web/sites/storefront/backups?api-version=2023-12-01",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"value":[
                    {"properties":{"status":"Succeeded","created":"2024-03-01T02:00:00Z","finishedTimeStamp":"2024-03-01T02:30:00Z"}},
                    {"properties":{"status":"InProgress","created":"2024-03-02T02:00:00Z"}},
                    {"properties":{"status":"TimedOut","created":"2024-02-28T02:00:00Z","finishedTimeStamp":"2024-02-28T04:00:00Z"}}
                ]}"#,
            )
            .create_async()
            .await;

        let attempts = client(server.url())
            .list_backup_attempts(&subscription(), &app())
            .await
            .unwrap();

        assert_eq!(attempts.len(), 3);
        assert_eq!(attempts[0].status, AttemptStatus::Succeeded);
        assert!(attempts[1].finished_at.is_none());
        assert_eq!(
            attempts[2].status,
            AttemptStatus::Other("TimedOut".to_string())
        );
    }

    #[test]
    fn arm_error_envelopes_are_unwrapped() {
        let body = r#"{"error":{"code":"AuthorizationFailed","message":"The client does not have authorization"}}"#;
        assert_eq!(
            arm_error_message(body),
            "AuthorizationFailed: The client does not have authorization"
        );

        assert_eq!(arm_error_message("plain text"), "plain text");
    }

    #[tokio::test]
    async fn server_errors_surface_status_and_body() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock(
                "GET",
                "/subscriptions/sub-1/providers/Microsoft.Web/sites?api-version=2023-12-01",
            )
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let err = client(server.url())
            .list_apps(&subscription())
            .await
            .unwrap_err();

        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("upstream exploded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
