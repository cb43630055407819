use blobsweep_lifecycle::purge_old_blobs;
use blobsweep_store::ObjectStore;
use clap::Args;

use crate::OutputFormat;
use crate::commands::print_report;

#[derive(Args, Debug)]
pub struct PurgeArgs {
    /// Container to purge.
    #[arg(long)]
    pub container: String,

    /// Delete blobs last modified strictly more than this many days ago.
    #[arg(long)]
    pub days: u32,
}

pub async fn run(
    store: &dyn ObjectStore,
    args: &PurgeArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let report = purge_old_blobs(store, &args.container, args.days).await?;
    let failed = print_report(&report, format)?;
    if failed > 0 {
        anyhow::bail!("{failed} blob(s) failed");
    }
    Ok(())
}
