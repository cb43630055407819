//! Backend conformance test suite.
//!
//! Backends call [`run_store_conformance_tests`] from their own test module
//! with a store seeded to the fixture described below. The suite exercises
//! the full [`ObjectStore`] surface including the not-found error paths.
//!
//! Required fixture:
//!
//! - container [`SOURCE_CONTAINER`] holding blobs [`OLD_BLOB`] and
//!   [`FRESH_BLOB`], with `OLD_BLOB` last modified strictly before
//!   `FRESH_BLOB`;
//! - container [`DEST_CONTAINER`], empty.

use crate::error::StoreError;
use crate::store::ObjectStore;

/// Source container the suite reads from and deletes out of.
pub const SOURCE_CONTAINER: &str = "conformance-src";
/// Destination container the suite copies into.
pub const DEST_CONTAINER: &str = "conformance-dst";
/// Blob seeded with the older last-modified instant.
pub const OLD_BLOB: &str = "logs/old.log";
/// Blob seeded with the newer last-modified instant.
pub const FRESH_BLOB: &str = "logs/fresh.log";

/// Run the full conformance suite against a fixture-seeded store.
///
/// The suite mutates the store (it copies and deletes [`OLD_BLOB`]); give it
/// a fresh fixture per invocation.
///
/// # Errors
///
/// Returns the first backend error encountered; assertion failures panic.
pub async fn run_store_conformance_tests(store: &dyn ObjectStore) -> Result<(), StoreError> {
    test_list_source(store).await?;
    test_properties(store).await?;
    test_missing_blob(store).await?;
    test_missing_container(store).await?;
    test_copy_then_delete(store).await?;
    test_delete_missing(store).await?;
    Ok(())
}

async fn test_list_source(store: &dyn ObjectStore) -> Result<(), StoreError> {
    let entries = store.list(SOURCE_CONTAINER).await?;
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&OLD_BLOB), "listing should include {OLD_BLOB}");
    assert!(
        names.contains(&FRESH_BLOB),
        "listing should include {FRESH_BLOB}"
    );
    Ok(())
}

async fn test_properties(store: &dyn ObjectStore) -> Result<(), StoreError> {
    let old = store.get_properties(SOURCE_CONTAINER, OLD_BLOB).await?;
    let fresh = store.get_properties(SOURCE_CONTAINER, FRESH_BLOB).await?;
    assert!(
        old.last_modified < fresh.last_modified,
        "fixture requires {OLD_BLOB} to be older than {FRESH_BLOB}"
    );
    Ok(())
}

async fn test_missing_blob(store: &dyn ObjectStore) -> Result<(), StoreError> {
    let err = store
        .get_properties(SOURCE_CONTAINER, "no/such/blob")
        .await
        .expect_err("properties of a missing blob should fail");
    assert!(
        matches!(err, StoreError::BlobNotFound { .. }),
        "expected BlobNotFound, got: {err}"
    );
    Ok(())
}

async fn test_missing_container(store: &dyn ObjectStore) -> Result<(), StoreError> {
    let err = store
        .list("no-such-container")
        .await
        .expect_err("listing a missing container should fail");
    assert!(
        matches!(err, StoreError::ContainerNotFound(_)),
        "expected ContainerNotFound, got: {err}"
    );
    Ok(())
}

async fn test_copy_then_delete(store: &dyn ObjectStore) -> Result<(), StoreError> {
    store
        .copy(SOURCE_CONTAINER, DEST_CONTAINER, OLD_BLOB)
        .await?;
    let copied = store.get_properties(DEST_CONTAINER, OLD_BLOB).await?;
    assert!(copied.size_bytes > 0, "copied blob should carry content");

    store.delete(SOURCE_CONTAINER, OLD_BLOB).await?;
    let entries = store.list(SOURCE_CONTAINER).await?;
    assert!(
        !entries.iter().any(|e| e.name == OLD_BLOB),
        "{OLD_BLOB} should be gone from the source after delete"
    );
    Ok(())
}

async fn test_delete_missing(store: &dyn ObjectStore) -> Result<(), StoreError> {
    let err = store
        .delete(SOURCE_CONTAINER, OLD_BLOB)
        .await
        .expect_err("deleting an already-deleted blob should fail");
    assert!(
        matches!(err, StoreError::BlobNotFound { .. }),
        "expected BlobNotFound, got: {err}"
    );
    Ok(())
}
