//! Storage capability trait and error taxonomy.
//!
//! [`ObjectStore`] is the narrow seam between the sweep engine and a storage
//! service: list, fetch properties, server-side copy, delete. Backends live
//! in their own crates (`blobsweep-azure` for Azure Blob Storage,
//! `blobsweep-store-memory` for tests and local development).

pub mod error;
pub mod store;
pub mod testing;

pub use error::StoreError;
pub use store::ObjectStore;
