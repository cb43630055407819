//! Azure Blob Storage backend for blobsweep.
//!
//! Implements the [`ObjectStore`](blobsweep_store::ObjectStore) trait over
//! the `azure_storage_blob` SDK. Authentication uses a service principal
//! when tenant/client/secret are configured, and falls back to the Azure CLI
//! login context otherwise. An endpoint URL override supports Azurite for
//! local development.

pub mod config;
pub mod error;
pub mod store;

pub use config::AzureStoreConfig;
pub use error::classify_azure_error;
pub use store::AzureBlobStore;
