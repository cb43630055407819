use blobsweep_core::LifecyclePolicy;
use blobsweep_lifecycle::{archive_old_blobs, purge_old_blobs};
use blobsweep_store::ObjectStore;
use clap::Args;
use tracing::info;

use crate::OutputFormat;
use crate::commands::print_report;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a TOML lifecycle policy file.
    #[arg(long)]
    pub policy: String,
}

pub async fn run(
    store: &dyn ObjectStore,
    args: &RunArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.policy)?;
    let policy: LifecyclePolicy = toml::from_str(&content)?;
    policy.validate()?;

    if policy.is_empty() {
        anyhow::bail!("policy file contains no rules");
    }
    if let Some(ref description) = policy.description {
        info!(policy = %description, "running lifecycle policy");
    }

    let mut failed = 0;
    for rule in policy.archive.iter().filter(|r| r.enabled) {
        let report =
            archive_old_blobs(store, &rule.source, &rule.destination, rule.max_age_days).await?;
        failed += print_report(&report, format)?;
    }
    for rule in policy.purge.iter().filter(|r| r.enabled) {
        let report = purge_old_blobs(store, &rule.container, rule.max_age_days).await?;
        failed += print_report(&report, format)?;
    }

    if failed > 0 {
        anyhow::bail!("{failed} blob(s) failed across the policy run");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_POLICY: &str = r#"
description = "archive hot data after 30d, purge the archive after 60d"

[[archive]]
source = "hot"
destination = "archive"
max_age_days = 30

[[purge]]
container = "archive"
max_age_days = 60
"#;

    #[test]
    fn sample_policy_parses_and_validates() {
        let policy: LifecyclePolicy = toml::from_str(SAMPLE_POLICY).unwrap();
        assert_eq!(policy.archive.len(), 1);
        assert_eq!(policy.purge.len(), 1);
        assert_eq!(policy.archive[0].source, "hot");
        assert_eq!(policy.archive[0].max_age_days, 30);
        assert!(policy.archive[0].enabled);
        assert_eq!(policy.purge[0].max_age_days, 60);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn disabled_rule_parses() {
        let policy: LifecyclePolicy = toml::from_str(
            r#"
[[purge]]
container = "archive"
max_age_days = 60
enabled = false
"#,
        )
        .unwrap();
        assert!(!policy.purge[0].enabled);
    }

    #[test]
    fn invalid_policy_is_rejected() {
        let policy: LifecyclePolicy = toml::from_str(
            r#"
[[archive]]
source = "hot"
destination = "hot"
max_age_days = 30
"#,
        )
        .unwrap();
        assert!(policy.validate().is_err());
    }
}
