use std::sync::Arc;

use azure_core::credentials::{Secret, TokenCredential};
use serde::{Deserialize, Serialize};
use tracing::debug;

use blobsweep_store::StoreError;

/// Configuration for the Azure Blob Storage backend.
///
/// Either `account_name` or `endpoint_url` must be set; `endpoint_url` wins
/// when both are present (the override exists for `Azurite`). The
/// tenant/client/secret triple selects service-principal authentication;
/// when any of the three is absent the backend falls back to the Azure CLI
/// credential.
#[derive(Clone, Serialize, Deserialize)]
pub struct AzureStoreConfig {
    /// Azure Storage account name.
    #[serde(default)]
    pub account_name: Option<String>,

    /// Endpoint URL override for local development (e.g. `Azurite`).
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Azure AD tenant ID.
    #[serde(default)]
    pub tenant_id: Option<String>,

    /// Azure AD application (client) ID.
    #[serde(default)]
    pub client_id: Option<String>,

    /// Azure AD client secret (service principal). Redacted in `Debug`.
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl std::fmt::Debug for AzureStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureStoreConfig")
            .field("account_name", &self.account_name)
            .field("endpoint_url", &self.endpoint_url)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id.as_ref().map(|_| "[REDACTED]"))
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl AzureStoreConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            account_name: None,
            endpoint_url: None,
            tenant_id: None,
            client_id: None,
            client_secret: None,
        }
    }

    /// Set the storage account name.
    #[must_use]
    pub fn with_account_name(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = Some(account_name.into());
        self
    }

    /// Set the endpoint URL override (for `Azurite`).
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the Azure AD tenant ID.
    #[must_use]
    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Set the Azure AD application (client) ID.
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the Azure AD client secret.
    #[must_use]
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Resolve the blob service endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] when neither an endpoint
    /// override nor an account name is configured.
    pub fn endpoint(&self) -> Result<String, StoreError> {
        if let Some(url) = &self.endpoint_url {
            return Ok(url.trim_end_matches('/').to_owned());
        }
        self.account_name
            .as_deref()
            .map(|account| format!("https://{account}.blob.core.windows.net"))
            .ok_or_else(|| {
                StoreError::Configuration(
                    "azure blob: account_name or endpoint_url is required".to_owned(),
                )
            })
    }

    /// The service-principal triple, when all three parts are configured.
    fn service_principal(&self) -> Option<(&str, &str, &str)> {
        match (&self.tenant_id, &self.client_id, &self.client_secret) {
            (Some(tenant), Some(client), Some(secret)) => {
                Some((tenant, client, secret))
            }
            _ => None,
        }
    }

    /// Build the token credential this configuration selects: the service
    /// principal when the tenant/client/secret triple is complete, otherwise
    /// the Azure CLI login context (development and CI).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] if credential construction
    /// fails.
    pub fn credential(&self) -> Result<Arc<dyn TokenCredential>, StoreError> {
        if let Some((tenant_id, client_id, client_secret)) = self.service_principal() {
            debug!(%tenant_id, "authenticating as service principal");
            let credential = azure_identity::ClientSecretCredential::new(
                tenant_id,
                client_id.to_owned(),
                Secret::new(client_secret.to_owned()),
                None,
            )
            .map_err(|e| StoreError::Configuration(e.to_string()))?;
            Ok(credential)
        } else {
            debug!("no service principal configured, authenticating via Azure CLI");
            let credential = azure_identity::AzureCliCredential::new(None)
                .map_err(|e| StoreError::Configuration(e.to_string()))?;
            Ok(credential)
        }
    }
}

impl Default for AzureStoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_has_no_endpoint() {
        let config = AzureStoreConfig::new();
        assert!(config.endpoint().is_err());
    }

    #[test]
    fn endpoint_from_account_name() {
        let config = AzureStoreConfig::new().with_account_name("mystorageaccount");
        assert_eq!(
            config.endpoint().unwrap(),
            "https://mystorageaccount.blob.core.windows.net"
        );
    }

    #[test]
    fn endpoint_override_wins() {
        let config = AzureStoreConfig::new()
            .with_account_name("mystorageaccount")
            .with_endpoint_url("http://127.0.0.1:10000/devstoreaccount1/");
        assert_eq!(
            config.endpoint().unwrap(),
            "http://127.0.0.1:10000/devstoreaccount1"
        );
    }

    #[test]
    fn builder_chain() {
        let config = AzureStoreConfig::new()
            .with_account_name("teststorage")
            .with_tenant_id("tid-123")
            .with_client_id("cid-456")
            .with_client_secret("secret-789");
        assert_eq!(config.account_name.as_deref(), Some("teststorage"));
        assert_eq!(config.tenant_id.as_deref(), Some("tid-123"));
        assert_eq!(config.client_id.as_deref(), Some("cid-456"));
        assert_eq!(config.client_secret.as_deref(), Some("secret-789"));
    }

    #[test]
    fn service_principal_requires_full_triple() {
        let partial = AzureStoreConfig::new()
            .with_tenant_id("tid")
            .with_client_id("cid");
        assert!(partial.service_principal().is_none());

        let full = partial.with_client_secret("secret");
        assert_eq!(full.service_principal(), Some(("tid", "cid", "secret")));
    }

    #[test]
    fn debug_redacts_credentials() {
        let config = AzureStoreConfig::new()
            .with_account_name("teststorage")
            .with_client_id("my-app-id")
            .with_client_secret("super-private");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("teststorage"));
        assert!(!debug.contains("my-app-id"));
        assert!(!debug.contains("super-private"));
    }

    #[test]
    fn serde_roundtrip() {
        let config = AzureStoreConfig::new()
            .with_account_name("archive")
            .with_endpoint_url("http://azurite:10000");

        let json = serde_json::to_string(&config).unwrap();
        let back: AzureStoreConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.account_name.as_deref(), Some("archive"));
        assert_eq!(back.endpoint_url.as_deref(), Some("http://azurite:10000"));
        assert!(back.tenant_id.is_none());
    }
}
