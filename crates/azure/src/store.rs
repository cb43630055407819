use async_trait::async_trait;
use azure_storage_blob::BlobServiceClient;
use azure_storage_blob::models::BlobClientGetPropertiesResultHeaders;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use tracing::{debug, error, info, instrument};

use blobsweep_core::{BlobEntry, BlobProperties};
use blobsweep_store::{ObjectStore, StoreError};

use crate::config::AzureStoreConfig;
use crate::error::classify_azure_error;

/// Azure Blob Storage implementation of [`ObjectStore`].
pub struct AzureBlobStore {
    config: AzureStoreConfig,
    service_client: BlobServiceClient,
    endpoint: String,
}

impl std::fmt::Debug for AzureBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureBlobStore")
            .field("config", &self.config)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl AzureBlobStore {
    /// Create a new `AzureBlobStore` by building an Azure Blob Storage client.
    pub fn new(config: AzureStoreConfig) -> Result<Self, StoreError> {
        let endpoint = config.endpoint()?;
        let credential = config.credential()?;

        let service_client = BlobServiceClient::new(&endpoint, Some(credential), None)
            .map_err(|e| StoreError::Configuration(format!("blob client error: {e}")))?;

        Ok(Self {
            config,
            service_client,
            endpoint,
        })
    }

    /// URL of a blob within this account, used as the source for
    /// server-side copies.
    fn blob_url(&self, container: &str, blob_name: &str) -> String {
        blob_url(&self.endpoint, container, blob_name)
    }
}

fn blob_url(endpoint: &str, container: &str, blob_name: &str) -> String {
    format!("{endpoint}/{container}/{blob_name}")
}

#[async_trait]
impl ObjectStore for AzureBlobStore {
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "azure-blob"
    }

    #[instrument(skip(self), fields(backend = "azure-blob"))]
    async fn list(&self, container: &str) -> Result<Vec<BlobEntry>, StoreError> {
        debug!(container = %container, "listing blobs");
        let container_client = self.service_client.blob_container_client(container);

        let mut pager = container_client
            .list_blobs(None)
            .map_err(|e| {
                error!(error = %e, "listing failed to start");
                classify_azure_error(&e.to_string(), container, None)
            })?
            .into_pages();

        let mut entries = Vec::new();
        while let Some(page) = pager.next().await {
            let page = page.map_err(|e| {
                error!(error = %e, "listing page fetch failed");
                classify_azure_error(&e.to_string(), container, None)
            })?;
            let body = page
                .into_model()
                .map_err(|e| classify_azure_error(&e.to_string(), container, None))?;

            let items = body.segment.blob_items;
            for item in items {
                let Some(name) = item.name.and_then(|n| n.content) else {
                    continue;
                };
                let (last_modified, size_bytes) = match item.properties {
                    Some(props) => (
                        props.last_modified.and_then(to_chrono),
                        props.content_length.and_then(|len| u64::try_from(len).ok()),
                    ),
                    None => (None, None),
                };
                entries.push(BlobEntry {
                    name,
                    last_modified,
                    size_bytes,
                });
            }
        }

        info!(container = %container, count = entries.len(), "listed container");
        Ok(entries)
    }

    #[instrument(skip(self), fields(backend = "azure-blob"))]
    async fn get_properties(
        &self,
        container: &str,
        blob_name: &str,
    ) -> Result<BlobProperties, StoreError> {
        debug!(container = %container, blob_name = %blob_name, "fetching blob properties");
        let blob_client = self.service_client.blob_client(container, blob_name);

        let response = blob_client.get_properties(None).await.map_err(|e| {
            error!(error = %e, "properties fetch failed");
            classify_azure_error(&e.to_string(), container, Some(blob_name))
        })?;

        let last_modified = response
            .last_modified()
            .ok()
            .flatten()
            .and_then(to_chrono)
            .ok_or_else(|| {
                StoreError::Transfer(format!(
                    "no Last-Modified header for {container}/{blob_name}"
                ))
            })?;
        let size_bytes = response
            .content_length()
            .ok()
            .flatten()
            .and_then(|len| u64::try_from(len).ok())
            .unwrap_or(0);
        let content_type = response
            .headers()
            .get_optional_string(&azure_core::http::headers::CONTENT_TYPE);
        let etag = response.etag().ok().flatten().map(|etag| etag.to_string());

        Ok(BlobProperties {
            last_modified,
            size_bytes,
            content_type,
            etag,
        })
    }

    #[instrument(skip(self), fields(backend = "azure-blob"))]
    async fn copy(
        &self,
        source_container: &str,
        dest_container: &str,
        blob_name: &str,
    ) -> Result<(), StoreError> {
        let source_url = self.blob_url(source_container, blob_name);
        debug!(source = %source_url, dest_container = %dest_container, "starting server-side copy");

        let dest_client = self.service_client.blob_client(dest_container, blob_name);

        // Put Blob From URL: the service copies the blob server-side and the
        // copy is complete when the request returns.
        dest_client
            .block_blob_client()
            .upload_blob_from_url(source_url, None)
            .await
            .map_err(|e| {
                error!(error = %e, "copy failed");
                classify_azure_error(&e.to_string(), dest_container, Some(blob_name))
            })?;

        info!(
            source_container = %source_container,
            dest_container = %dest_container,
            blob_name = %blob_name,
            "copy accepted"
        );
        Ok(())
    }

    #[instrument(skip(self), fields(backend = "azure-blob"))]
    async fn delete(&self, container: &str, blob_name: &str) -> Result<(), StoreError> {
        debug!(container = %container, blob_name = %blob_name, "deleting blob");
        let blob_client = self.service_client.blob_client(container, blob_name);

        blob_client.delete(None).await.map_err(|e| {
            error!(error = %e, "delete failed");
            classify_azure_error(&e.to_string(), container, Some(blob_name))
        })?;

        info!(container = %container, blob_name = %blob_name, "blob deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(backend = "azure-blob"))]
    async fn health_check(&self) -> Result<(), StoreError> {
        debug!("performing Azure Blob health check");
        // List containers to verify connectivity and credentials.
        let mut pager = self.service_client.list_containers(None).map_err(|e| {
            error!(error = %e, "Azure Blob health check failed");
            health_error(&e.to_string())
        })?;
        if let Some(page) = pager.next().await {
            page.map_err(|e| {
                error!(error = %e, "Azure Blob health check failed");
                health_error(&e.to_string())
            })?;
        }
        info!("Azure Blob health check passed");
        Ok(())
    }
}

/// Classify a health-check failure. Rejected credentials keep their
/// [`StoreError::Authorization`] classification; everything else is a
/// connectivity problem, since the check addresses no particular container.
fn health_error(error_str: &str) -> StoreError {
    match classify_azure_error(error_str, "", None) {
        auth @ StoreError::Authorization(_) => auth,
        conn @ StoreError::Connectivity(_) => conn,
        _ => StoreError::Connectivity(format!("health check failed: {error_str}")),
    }
}

/// Convert the SDK's `OffsetDateTime` to a chrono UTC instant.
fn to_chrono(ts: azure_core::time::OffsetDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.unix_timestamp(), ts.nanosecond())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_url_joins_endpoint_container_and_name() {
        let url = blob_url("https://acct.blob.core.windows.net", "hot", "logs/a.log");
        assert_eq!(url, "https://acct.blob.core.windows.net/hot/logs/a.log");
    }

    #[test]
    fn health_errors_keep_authorization_classification() {
        let err = health_error("HTTP status 403 (Forbidden): AuthorizationFailure");
        assert!(matches!(err, StoreError::Authorization(_)));

        let err = health_error("connection refused");
        assert!(matches!(err, StoreError::Connectivity(_)));
        assert!(err.is_retryable());

        // A 404 on the account listing is not a missing container.
        let err = health_error("HTTP status 404 (Not Found)");
        assert!(matches!(err, StoreError::Connectivity(_)));
    }

    #[test]
    fn offset_datetime_converts_to_chrono() {
        let odt = azure_core::time::OffsetDateTime::from_unix_timestamp(1_725_000_000).unwrap();
        let utc = to_chrono(odt).unwrap();
        assert_eq!(utc.timestamp(), 1_725_000_000);
    }
}
