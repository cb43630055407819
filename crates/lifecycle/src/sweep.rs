use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, instrument, warn};

use blobsweep_core::{BlobEntry, BlobOutcome, Disposition, SweepOperation, SweepReport};
use blobsweep_store::{ObjectStore, StoreError};

/// The instant `max_age_days` before `now`. Blobs last modified strictly
/// before this instant are eligible for archival or deletion.
///
/// Returns [`StoreError::Configuration`] when the threshold pushes the
/// cutoff outside the representable timestamp range.
pub fn cutoff_before(now: DateTime<Utc>, max_age_days: u32) -> Result<DateTime<Utc>, StoreError> {
    now.checked_sub_signed(Duration::days(i64::from(max_age_days)))
        .ok_or_else(|| {
            StoreError::Configuration(format!(
                "age threshold of {max_age_days} days is out of range"
            ))
        })
}

/// Strict eligibility comparison: a blob modified exactly at the cutoff
/// instant is NOT eligible.
#[must_use]
pub fn is_eligible(last_modified: DateTime<Utc>, cutoff: DateTime<Utc>) -> bool {
    last_modified < cutoff
}

/// List all blobs currently present in `container`.
#[instrument(skip(store), fields(backend = store.name()))]
pub async fn list_blobs(
    store: &dyn ObjectStore,
    container: &str,
) -> Result<Vec<BlobEntry>, StoreError> {
    let entries = store.list(container).await?;
    debug!(count = entries.len(), "listed container");
    Ok(entries)
}

/// Archive every blob in `source` older than `max_age_days` into
/// `destination`: server-side copy, then delete from the source.
///
/// The cutoff is computed once at the start of the pass. A failure to list
/// the source is fatal; per-blob failures are recorded in the report and the
/// pass continues. When the copy succeeds but the source delete fails, the
/// blob exists in both containers and the outcome is
/// [`Disposition::OrphanedCopy`].
///
/// Copy completion is not polled before the delete is issued; an
/// asynchronous server-side copy may still be in flight.
#[instrument(skip(store), fields(backend = store.name()))]
pub async fn archive_old_blobs(
    store: &dyn ObjectStore,
    source: &str,
    destination: &str,
    max_age_days: u32,
) -> Result<SweepReport, StoreError> {
    let started_at = Utc::now();
    let cutoff = cutoff_before(started_at, max_age_days)?;
    debug!(%cutoff, "starting archive pass");

    let entries = store.list(source).await?;
    let mut outcomes = Vec::with_capacity(entries.len());

    for entry in &entries {
        let props = match store.get_properties(source, &entry.name).await {
            Ok(props) => props,
            Err(err) => {
                warn!(blob = %entry.name, error = %err, "properties fetch failed");
                outcomes.push(failure(entry, None, |error, retryable| {
                    Disposition::MetadataFailed { error, retryable }
                }, &err));
                continue;
            }
        };

        if !is_eligible(props.last_modified, cutoff) {
            outcomes.push(outcome(entry, Some(props.last_modified), Disposition::Retained));
            continue;
        }

        if let Err(err) = store.copy(source, destination, &entry.name).await {
            warn!(blob = %entry.name, error = %err, "copy failed; source blob retained");
            outcomes.push(failure(
                entry,
                Some(props.last_modified),
                |error, retryable| Disposition::CopyFailed { error, retryable },
                &err,
            ));
            continue;
        }

        match store.delete(source, &entry.name).await {
            Ok(()) => {
                debug!(blob = %entry.name, "archived");
                outcomes.push(outcome(entry, Some(props.last_modified), Disposition::Archived));
            }
            Err(err) => {
                warn!(
                    blob = %entry.name,
                    error = %err,
                    "delete failed after copy; blob now exists in both containers"
                );
                outcomes.push(failure(
                    entry,
                    Some(props.last_modified),
                    |error, retryable| Disposition::OrphanedCopy { error, retryable },
                    &err,
                ));
            }
        }
    }

    let report = SweepReport {
        operation: SweepOperation::Archive,
        container: source.to_owned(),
        destination: Some(destination.to_owned()),
        cutoff,
        started_at,
        finished_at: Utc::now(),
        outcomes,
    };
    info!(
        archived = report.archived(),
        retained = report.retained(),
        failed = report.failed(),
        "archive pass finished"
    );
    Ok(report)
}

/// Delete every blob in `container` older than `max_age_days`.
///
/// Same error policy as [`archive_old_blobs`]: listing failure is fatal,
/// per-blob failures are recorded and the pass continues.
#[instrument(skip(store), fields(backend = store.name()))]
pub async fn purge_old_blobs(
    store: &dyn ObjectStore,
    container: &str,
    max_age_days: u32,
) -> Result<SweepReport, StoreError> {
    let started_at = Utc::now();
    let cutoff = cutoff_before(started_at, max_age_days)?;
    debug!(%cutoff, "starting purge pass");

    let entries = store.list(container).await?;
    let mut outcomes = Vec::with_capacity(entries.len());

    for entry in &entries {
        let props = match store.get_properties(container, &entry.name).await {
            Ok(props) => props,
            Err(err) => {
                warn!(blob = %entry.name, error = %err, "properties fetch failed");
                outcomes.push(failure(entry, None, |error, retryable| {
                    Disposition::MetadataFailed { error, retryable }
                }, &err));
                continue;
            }
        };

        if !is_eligible(props.last_modified, cutoff) {
            outcomes.push(outcome(entry, Some(props.last_modified), Disposition::Retained));
            continue;
        }

        match store.delete(container, &entry.name).await {
            Ok(()) => {
                debug!(blob = %entry.name, "purged");
                outcomes.push(outcome(entry, Some(props.last_modified), Disposition::Purged));
            }
            Err(err) => {
                warn!(blob = %entry.name, error = %err, "delete failed");
                outcomes.push(failure(
                    entry,
                    Some(props.last_modified),
                    |error, retryable| Disposition::DeleteFailed { error, retryable },
                    &err,
                ));
            }
        }
    }

    let report = SweepReport {
        operation: SweepOperation::Purge,
        container: container.to_owned(),
        destination: None,
        cutoff,
        started_at,
        finished_at: Utc::now(),
        outcomes,
    };
    info!(
        purged = report.purged(),
        retained = report.retained(),
        failed = report.failed(),
        "purge pass finished"
    );
    Ok(report)
}

fn outcome(
    entry: &BlobEntry,
    last_modified: Option<DateTime<Utc>>,
    disposition: Disposition,
) -> BlobOutcome {
    BlobOutcome {
        blob_name: entry.name.clone(),
        last_modified,
        disposition,
    }
}

fn failure(
    entry: &BlobEntry,
    last_modified: Option<DateTime<Utc>>,
    make: impl FnOnce(String, bool) -> Disposition,
    err: &StoreError,
) -> BlobOutcome {
    outcome(entry, last_modified, make(err.to_string(), err.is_retryable()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_is_days_before_now() {
        let now = Utc::now();
        let cutoff = cutoff_before(now, 30).unwrap();
        assert_eq!(now - cutoff, Duration::days(30));
    }

    #[test]
    fn cutoff_handles_large_thresholds() {
        let now = Utc::now();
        let cutoff = cutoff_before(now, 36_500).unwrap();
        assert!(cutoff < now);
    }

    #[test]
    fn cutoff_rejects_out_of_range_threshold() {
        let err = cutoff_before(Utc::now(), u32::MAX).unwrap_err();
        assert!(matches!(err, StoreError::Configuration(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn boundary_equality_is_not_eligible() {
        let cutoff = Utc::now();
        assert!(!is_eligible(cutoff, cutoff));
        assert!(is_eligible(cutoff - Duration::seconds(1), cutoff));
        assert!(!is_eligible(cutoff + Duration::seconds(1), cutoff));
    }
}
