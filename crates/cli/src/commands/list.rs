use blobsweep_lifecycle::list_blobs;
use blobsweep_store::ObjectStore;
use clap::Args;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Container to list.
    #[arg(long)]
    pub container: String,
}

pub async fn run(
    store: &dyn ObjectStore,
    args: &ListArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let entries = list_blobs(store, &args.container).await?;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            for entry in &entries {
                let modified = entry
                    .last_modified
                    .map_or_else(|| "-".to_owned(), |ts| ts.to_rfc3339());
                let size = entry
                    .size_bytes
                    .map_or_else(|| "-".to_owned(), |s| s.to_string());
                println!("{}\t{}\t{}", entry.name, modified, size);
            }
            println!("{} blob(s) in {}", entries.len(), args.container);
        }
    }
    Ok(())
}
