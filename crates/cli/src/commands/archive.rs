use blobsweep_lifecycle::archive_old_blobs;
use blobsweep_store::ObjectStore;
use clap::Args;

use crate::OutputFormat;
use crate::commands::print_report;

#[derive(Args, Debug)]
pub struct ArchiveArgs {
    /// Source container.
    #[arg(long)]
    pub source: String,

    /// Destination (archive) container.
    #[arg(long)]
    pub destination: String,

    /// Archive blobs last modified strictly more than this many days ago.
    #[arg(long)]
    pub days: u32,
}

pub async fn run(
    store: &dyn ObjectStore,
    args: &ArchiveArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let report = archive_old_blobs(store, &args.source, &args.destination, args.days).await?;
    let failed = print_report(&report, format)?;
    if failed > 0 {
        anyhow::bail!("{failed} blob(s) failed");
    }
    Ok(())
}
