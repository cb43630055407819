pub mod archive;
pub mod health;
pub mod list;
pub mod purge;
pub mod run;

use blobsweep_core::{Disposition, SweepReport};

use crate::OutputFormat;

/// Print a sweep report and return the number of failed blobs.
pub fn print_report(report: &SweepReport, format: &OutputFormat) -> anyhow::Result<usize> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text => {
            match &report.destination {
                Some(dest) => println!(
                    "archive {} -> {} (cutoff {})",
                    report.container, dest, report.cutoff
                ),
                None => println!("purge {} (cutoff {})", report.container, report.cutoff),
            }
            for outcome in &report.outcomes {
                match &outcome.disposition {
                    Disposition::Archived => println!("  archived  {}", outcome.blob_name),
                    Disposition::Purged => println!("  purged    {}", outcome.blob_name),
                    Disposition::Retained => println!("  retained  {}", outcome.blob_name),
                    Disposition::MetadataFailed { error, .. } => {
                        println!("  FAILED    {} (properties: {error})", outcome.blob_name);
                    }
                    Disposition::CopyFailed { error, .. } => {
                        println!("  FAILED    {} (copy: {error})", outcome.blob_name);
                    }
                    Disposition::OrphanedCopy { error, .. } => {
                        println!(
                            "  FAILED    {} (copied but not deleted, exists in both: {error})",
                            outcome.blob_name
                        );
                    }
                    Disposition::DeleteFailed { error, .. } => {
                        println!("  FAILED    {} (delete: {error})", outcome.blob_name);
                    }
                }
            }
            println!(
                "{} archived, {} purged, {} retained, {} failed",
                report.archived(),
                report.purged(),
                report.retained(),
                report.failed()
            );
        }
    }
    Ok(report.failed())
}
