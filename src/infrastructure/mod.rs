//! External collaborators: Azure AD authentication and Resource Manager API

pub mod api_clients;
pub mod auth;

pub use api_clients::{ApiError, AzureResourceClient, BackupProvider, SubscriptionDirectory};
pub use auth::{AccessTokenProvider, ClientCredentialsProvider, StaticTokenProvider};
