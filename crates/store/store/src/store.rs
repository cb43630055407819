use async_trait::async_trait;
use blobsweep_core::{BlobEntry, BlobProperties};

use crate::error::StoreError;

/// Narrow capability trait over an object storage service.
///
/// Implementors must be `Send + Sync` and safe for concurrent access. The
/// sweep engine drives this trait sequentially, one blob at a time; nothing
/// in the contract requires batching or pipelining.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the unique name of this backend (e.g. `"azure-blob"`).
    fn name(&self) -> &str;

    /// List all blobs currently present in `container`.
    ///
    /// The listing is forward-only and exhaustive: backends drain any
    /// service-side pagination internally and never expose a cursor.
    async fn list(&self, container: &str) -> Result<Vec<BlobEntry>, StoreError>;

    /// Fetch authoritative properties for a single blob.
    ///
    /// This is a separate round-trip from [`list`](Self::list); the blob may
    /// have vanished in between, in which case the error is
    /// [`StoreError::BlobNotFound`].
    async fn get_properties(
        &self,
        container: &str,
        blob_name: &str,
    ) -> Result<BlobProperties, StoreError>;

    /// Initiate a server-side copy of `blob_name` from `source_container`
    /// to `dest_container`, overwriting any existing blob of that name.
    ///
    /// Returns once the service has accepted the copy request. Completion
    /// is not polled; an asynchronous server-side copy may still be in
    /// flight when this returns.
    async fn copy(
        &self,
        source_container: &str,
        dest_container: &str,
        blob_name: &str,
    ) -> Result<(), StoreError>;

    /// Delete a blob. Deletion is immediate and irreversible.
    async fn delete(&self, container: &str, blob_name: &str) -> Result<(), StoreError>;

    /// Verify the backend can reach the service with its credentials.
    async fn health_check(&self) -> Result<(), StoreError>;
}
