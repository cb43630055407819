//! In-memory [`ObjectStore`] backend.
//!
//! Used by the engine tests and for local development. Containers must be
//! created explicitly; listing or addressing an unknown container fails the
//! same way a live backend does. Fault injection (`deny_properties`,
//! `deny_copy`, `deny_delete`) lets tests exercise the partial-failure
//! paths.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use dashmap::{DashMap, DashSet};

use blobsweep_core::{BlobEntry, BlobProperties};
use blobsweep_store::{ObjectStore, StoreError};

#[derive(Debug, Clone)]
struct BlobRecord {
    data: Bytes,
    properties: BlobProperties,
}

/// Seedable in-memory object store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    containers: DashMap<String, DashMap<String, BlobRecord>>,
    deny_properties: DashSet<(String, String)>,
    deny_copy: DashSet<(String, String)>,
    deny_delete: DashSet<(String, String)>,
}

impl MemoryStore {
    /// Create an empty store with no containers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container if it does not already exist.
    pub fn create_container(&self, name: impl Into<String>) {
        self.containers.entry(name.into()).or_default();
    }

    /// Builder-style [`create_container`](Self::create_container).
    #[must_use]
    pub fn with_container(self, name: impl Into<String>) -> Self {
        self.create_container(name);
        self
    }

    /// Insert a blob with an explicit last-modified instant.
    ///
    /// Creates the container if needed.
    pub fn put_blob(
        &self,
        container: impl Into<String>,
        name: impl Into<String>,
        last_modified: DateTime<Utc>,
        data: Bytes,
    ) {
        let name = name.into();
        let record = BlobRecord {
            properties: BlobProperties {
                last_modified,
                size_bytes: data.len() as u64,
                content_type: None,
                etag: None,
            },
            data,
        };
        self.containers
            .entry(container.into())
            .or_default()
            .insert(name, record);
    }

    /// Insert a blob whose last-modified instant is `age_days` before now,
    /// with the blob name as placeholder content.
    pub fn put_blob_aged(
        &self,
        container: impl Into<String>,
        name: impl Into<String>,
        age_days: i64,
    ) {
        let name = name.into();
        let data = Bytes::from(name.clone().into_bytes());
        self.put_blob(container, name, Utc::now() - Duration::days(age_days), data);
    }

    /// Returns `true` if the blob currently exists.
    #[must_use]
    pub fn contains(&self, container: &str, blob_name: &str) -> bool {
        self.containers
            .get(container)
            .is_some_and(|blobs| blobs.contains_key(blob_name))
    }

    /// Names of all blobs in a container, sorted. Empty for an unknown
    /// container.
    #[must_use]
    pub fn blob_names(&self, container: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .containers
            .get(container)
            .map(|blobs| blobs.iter().map(|e| e.key().clone()).collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Make every properties fetch of this blob fail with
    /// [`StoreError::BlobNotFound`], as if the blob was deleted between a
    /// listing and the fetch. The blob itself stays in place.
    pub fn deny_properties(&self, container: impl Into<String>, blob_name: impl Into<String>) {
        self.deny_properties
            .insert((container.into(), blob_name.into()));
    }

    /// Make every copy of this blob fail with [`StoreError::Transfer`].
    pub fn deny_copy(&self, container: impl Into<String>, blob_name: impl Into<String>) {
        self.deny_copy.insert((container.into(), blob_name.into()));
    }

    /// Make every delete of this blob fail with [`StoreError::Transfer`].
    pub fn deny_delete(&self, container: impl Into<String>, blob_name: impl Into<String>) {
        self.deny_delete
            .insert((container.into(), blob_name.into()));
    }

    fn container(
        &self,
        name: &str,
    ) -> Result<dashmap::mapref::one::Ref<'_, String, DashMap<String, BlobRecord>>, StoreError>
    {
        self.containers
            .get(name)
            .ok_or_else(|| StoreError::ContainerNotFound(name.to_owned()))
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list(&self, container: &str) -> Result<Vec<BlobEntry>, StoreError> {
        let blobs = self.container(container)?;
        let mut entries: Vec<BlobEntry> = blobs
            .iter()
            .map(|e| BlobEntry {
                name: e.key().clone(),
                last_modified: Some(e.value().properties.last_modified),
                size_bytes: Some(e.value().properties.size_bytes),
            })
            .collect();
        // Deterministic listing order, matching lexicographic services.
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn get_properties(
        &self,
        container: &str,
        blob_name: &str,
    ) -> Result<BlobProperties, StoreError> {
        let blobs = self.container(container)?;
        if self
            .deny_properties
            .contains(&(container.to_owned(), blob_name.to_owned()))
        {
            return Err(StoreError::BlobNotFound {
                container: container.to_owned(),
                blob_name: blob_name.to_owned(),
            });
        }
        blobs
            .get(blob_name)
            .map(|record| record.properties.clone())
            .ok_or_else(|| StoreError::BlobNotFound {
                container: container.to_owned(),
                blob_name: blob_name.to_owned(),
            })
    }

    async fn copy(
        &self,
        source_container: &str,
        dest_container: &str,
        blob_name: &str,
    ) -> Result<(), StoreError> {
        if self
            .deny_copy
            .contains(&(source_container.to_owned(), blob_name.to_owned()))
        {
            return Err(StoreError::Transfer(format!(
                "copy of {source_container}/{blob_name} denied by test fixture"
            )));
        }

        let record = {
            let blobs = self.container(source_container)?;
            blobs
                .get(blob_name)
                .map(|r| r.value().clone())
                .ok_or_else(|| StoreError::BlobNotFound {
                    container: source_container.to_owned(),
                    blob_name: blob_name.to_owned(),
                })?
        };

        let dest = self.container(dest_container)?;
        // The copied record keeps the source properties, so archived blobs
        // retain their age in tests.
        dest.insert(blob_name.to_owned(), record);
        Ok(())
    }

    async fn delete(&self, container: &str, blob_name: &str) -> Result<(), StoreError> {
        if self
            .deny_delete
            .contains(&(container.to_owned(), blob_name.to_owned()))
        {
            return Err(StoreError::Transfer(format!(
                "delete of {container}/{blob_name} denied by test fixture"
            )));
        }

        let blobs = self.container(container)?;
        blobs
            .remove(blob_name)
            .map(|_| ())
            .ok_or_else(|| StoreError::BlobNotFound {
                container: container.to_owned(),
                blob_name: blob_name.to_owned(),
            })
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobsweep_store::testing::{
        self, DEST_CONTAINER, FRESH_BLOB, OLD_BLOB, SOURCE_CONTAINER,
    };

    fn conformance_fixture() -> MemoryStore {
        let store = MemoryStore::new().with_container(DEST_CONTAINER);
        store.put_blob_aged(SOURCE_CONTAINER, OLD_BLOB, 40);
        store.put_blob_aged(SOURCE_CONTAINER, FRESH_BLOB, 1);
        store
    }

    #[tokio::test]
    async fn passes_conformance_suite() {
        let store = conformance_fixture();
        testing::run_store_conformance_tests(&store)
            .await
            .expect("conformance suite should pass");
    }

    #[tokio::test]
    async fn listing_is_sorted_by_name() {
        let store = MemoryStore::new();
        store.put_blob_aged("c", "b.log", 1);
        store.put_blob_aged("c", "a.log", 1);
        store.put_blob_aged("c", "z/deep.log", 1);

        let names: Vec<String> = store
            .list("c")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["a.log", "b.log", "z/deep.log"]);
    }

    #[tokio::test]
    async fn copy_preserves_properties() {
        let store = MemoryStore::new().with_container("dst");
        let modified = Utc::now() - Duration::days(40);
        store.put_blob("src", "data.csv", modified, Bytes::from_static(b"a,b"));

        store.copy("src", "dst", "data.csv").await.unwrap();

        let props = store.get_properties("dst", "data.csv").await.unwrap();
        assert_eq!(props.last_modified, modified);
        assert_eq!(props.size_bytes, 3);
        assert!(store.contains("src", "data.csv"), "copy must not delete");
    }

    #[tokio::test]
    async fn copy_to_missing_container_fails() {
        let store = MemoryStore::new();
        store.put_blob_aged("src", "x", 1);
        let err = store.copy("src", "missing", "x").await.unwrap_err();
        assert!(matches!(err, StoreError::ContainerNotFound(_)));
    }

    #[tokio::test]
    async fn deny_properties_reports_blob_as_missing() {
        let store = MemoryStore::new();
        store.put_blob_aged("src", "x", 1);
        store.deny_properties("src", "x");

        let err = store.get_properties("src", "x").await.unwrap_err();
        assert!(matches!(err, StoreError::BlobNotFound { .. }));
        // Listing still sees the blob, modelling a fetch that loses a race.
        assert!(store.contains("src", "x"));
    }

    #[tokio::test]
    async fn deny_copy_injects_transfer_error() {
        let store = MemoryStore::new().with_container("dst");
        store.put_blob_aged("src", "x", 1);
        store.deny_copy("src", "x");

        let err = store.copy("src", "dst", "x").await.unwrap_err();
        assert!(matches!(err, StoreError::Transfer(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn deny_delete_injects_transfer_error() {
        let store = MemoryStore::new();
        store.put_blob_aged("src", "x", 1);
        store.deny_delete("src", "x");

        let err = store.delete("src", "x").await.unwrap_err();
        assert!(matches!(err, StoreError::Transfer(_)));
        assert!(store.contains("src", "x"));
    }
}
