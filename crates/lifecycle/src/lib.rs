//! Sweep engine for blobsweep.
//!
//! Three operations over an [`ObjectStore`](blobsweep_store::ObjectStore):
//! listing, archiving (copy-then-delete past an age threshold), and purging
//! (delete past an age threshold). Each run computes its cutoff once,
//! processes blobs sequentially in listing order, continues past individual
//! failures, and returns a per-blob [`SweepReport`](blobsweep_core::SweepReport).

pub mod sweep;

pub use sweep::{archive_old_blobs, cutoff_before, is_eligible, list_blobs, purge_old_blobs};
