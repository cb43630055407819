//! blobsweep CLI
//!
//! Lifecycle management for cloud object storage: list blobs, archive old
//! blobs into a colder container, purge old blobs, or run a TOML policy
//! combining both.

mod commands;

use blobsweep_azure::{AzureBlobStore, AzureStoreConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

/// blobsweep — sweep old blobs to an archive container or delete them.
#[derive(Parser, Debug)]
#[command(name = "blobsweep", version, about)]
struct Cli {
    /// Azure Storage account name.
    #[arg(long, env = "BLOBSWEEP_ACCOUNT", global = true)]
    account: Option<String>,

    /// Endpoint URL override (e.g. Azurite).
    #[arg(long, env = "BLOBSWEEP_ENDPOINT_URL", global = true)]
    endpoint_url: Option<String>,

    /// Azure AD tenant ID for service-principal auth.
    #[arg(long, env = "BLOBSWEEP_TENANT_ID", global = true)]
    tenant_id: Option<String>,

    /// Azure AD client ID for service-principal auth.
    #[arg(long, env = "BLOBSWEEP_CLIENT_ID", global = true)]
    client_id: Option<String>,

    /// Azure AD client secret for service-principal auth.
    #[arg(long, env = "BLOBSWEEP_CLIENT_SECRET", global = true, hide_env_values = true)]
    client_secret: Option<String>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List blobs in a container.
    List(commands::list::ListArgs),
    /// Archive blobs older than a threshold (copy to a destination, then
    /// delete from the source).
    Archive(commands::archive::ArchiveArgs),
    /// Delete blobs older than a threshold.
    Purge(commands::purge::PurgeArgs),
    /// Run a TOML lifecycle policy (archive rules, then purge rules).
    Run(commands::run::RunArgs),
    /// Check storage connectivity and credentials.
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AzureStoreConfig::new();
    if let Some(ref account) = cli.account {
        config = config.with_account_name(account);
    }
    if let Some(ref url) = cli.endpoint_url {
        config = config.with_endpoint_url(url);
    }
    if let Some(ref tenant_id) = cli.tenant_id {
        config = config.with_tenant_id(tenant_id);
    }
    if let Some(ref client_id) = cli.client_id {
        config = config.with_client_id(client_id);
    }
    if let Some(ref client_secret) = cli.client_secret {
        config = config.with_client_secret(client_secret);
    }
    let store = AzureBlobStore::new(config)?;

    match cli.command {
        Command::List(args) => commands::list::run(&store, &args, &cli.format).await,
        Command::Archive(args) => commands::archive::run(&store, &args, &cli.format).await,
        Command::Purge(args) => commands::purge::run(&store, &args, &cli.format).await,
        Command::Run(args) => commands::run::run(&store, &args, &cli.format).await,
        Command::Health => commands::health::run(&store).await,
    }
}
