//! Core domain types for blobsweep.
//!
//! This crate defines the vocabulary shared by every backend and the sweep
//! engine:
//!
//! - [`BlobEntry`] / [`BlobProperties`] — what a listing yields and what a
//!   per-blob properties fetch returns.
//! - [`LifecyclePolicy`] — declarative archive/purge rules.
//! - [`SweepReport`] — per-blob outcomes of a sweep run.

pub mod policy;
pub mod report;
pub mod types;

pub use policy::{ArchiveRule, LifecyclePolicy, PolicyError, PurgeRule};
pub use report::{BlobOutcome, Disposition, SweepOperation, SweepReport};
pub use types::{BlobEntry, BlobProperties};
