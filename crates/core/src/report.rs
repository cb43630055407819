use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which sweep operation produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepOperation {
    /// Copy-then-delete into a destination container.
    Archive,
    /// Delete outright.
    Purge,
}

/// What happened to a single blob during a sweep pass.
///
/// Failure variants carry the backend error message and whether the error
/// was classified as retryable, so callers can decide what to re-run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Copied to the destination and deleted from the source.
    Archived,
    /// Deleted.
    Purged,
    /// Not old enough; left untouched.
    Retained,
    /// The per-blob properties fetch failed; the blob was not touched.
    MetadataFailed { error: String, retryable: bool },
    /// The server-side copy failed; the source blob remains.
    CopyFailed { error: String, retryable: bool },
    /// The copy succeeded but the source delete failed. The blob now exists
    /// in both the source and the destination container.
    OrphanedCopy { error: String, retryable: bool },
    /// The delete failed during a purge; the blob remains.
    DeleteFailed { error: String, retryable: bool },
}

impl Disposition {
    /// Returns `true` for the failure variants.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::MetadataFailed { .. }
                | Self::CopyFailed { .. }
                | Self::OrphanedCopy { .. }
                | Self::DeleteFailed { .. }
        )
    }
}

/// Per-blob record within a [`SweepReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobOutcome {
    /// Blob name within the swept container.
    pub blob_name: String,
    /// Last-modified instant used for the eligibility decision, when the
    /// properties fetch succeeded.
    pub last_modified: Option<DateTime<Utc>>,
    /// What the sweep did (or failed to do) with this blob.
    pub disposition: Disposition,
}

/// Aggregate result of one sweep pass over one container.
///
/// A report is produced even when some blobs fail: the sweep continues past
/// individual failures and records each one, so callers can distinguish
/// total failure (an `Err` from the engine) from partial success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    /// The operation that produced this report.
    pub operation: SweepOperation,
    /// The container that was swept (the source, for an archive).
    pub container: String,
    /// The destination container, for an archive.
    pub destination: Option<String>,
    /// The cutoff instant: blobs strictly older were eligible.
    pub cutoff: DateTime<Utc>,
    /// When the pass started.
    pub started_at: DateTime<Utc>,
    /// When the pass finished.
    pub finished_at: DateTime<Utc>,
    /// One outcome per listed blob, in listing order.
    pub outcomes: Vec<BlobOutcome>,
}

impl SweepReport {
    /// Number of blobs archived.
    #[must_use]
    pub fn archived(&self) -> usize {
        self.count(|d| matches!(d, Disposition::Archived))
    }

    /// Number of blobs purged.
    #[must_use]
    pub fn purged(&self) -> usize {
        self.count(|d| matches!(d, Disposition::Purged))
    }

    /// Number of blobs left untouched because they were not old enough.
    #[must_use]
    pub fn retained(&self) -> usize {
        self.count(|d| matches!(d, Disposition::Retained))
    }

    /// Number of blobs with a failure disposition.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(Disposition::is_failure)
    }

    /// Returns `true` when no blob failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&Disposition) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|o| pred(&o.disposition))
            .count()
    }
}
