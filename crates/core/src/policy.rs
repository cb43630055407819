use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A declarative lifecycle policy: archive rules followed by purge rules.
///
/// Rules run sequentially in file order. Per-blob failures inside one rule
/// do not stop later rules; only validation errors stop a run up front.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifecyclePolicy {
    /// Optional human-readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// Archive rules (copy to a destination container, then delete).
    #[serde(default)]
    pub archive: Vec<ArchiveRule>,

    /// Purge rules (delete outright).
    #[serde(default)]
    pub purge: Vec<PurgeRule>,
}

/// Move blobs older than `max_age_days` from `source` to `destination`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveRule {
    /// Source container name.
    pub source: String,
    /// Destination container name.
    pub destination: String,
    /// Age threshold in days. Eligibility is strictly older than the cutoff.
    pub max_age_days: u32,
    /// Whether this rule is active.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// Delete blobs older than `max_age_days` from `container`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeRule {
    /// Target container name.
    pub container: String,
    /// Age threshold in days. Eligibility is strictly older than the cutoff.
    pub max_age_days: u32,
    /// Whether this rule is active.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Validation errors for a [`LifecyclePolicy`].
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A container name was empty.
    #[error("rule {rule}: empty {field} container name")]
    EmptyContainer {
        /// Zero-based rule index within its section.
        rule: usize,
        /// Which field was empty (`"source"`, `"destination"`, `"container"`).
        field: &'static str,
    },

    /// An archive rule would copy a container onto itself.
    #[error("archive rule {rule}: source and destination are both '{container}'")]
    SameContainer {
        /// Zero-based rule index.
        rule: usize,
        /// The repeated container name.
        container: String,
    },

    /// An age threshold of zero days would make every blob eligible.
    #[error("rule {rule}: max_age_days must be at least 1")]
    ZeroThreshold {
        /// Zero-based rule index within its section.
        rule: usize,
    },
}

impl LifecyclePolicy {
    /// Validate all rules, enabled or not.
    pub fn validate(&self) -> Result<(), PolicyError> {
        for (i, rule) in self.archive.iter().enumerate() {
            if rule.source.is_empty() {
                return Err(PolicyError::EmptyContainer {
                    rule: i,
                    field: "source",
                });
            }
            if rule.destination.is_empty() {
                return Err(PolicyError::EmptyContainer {
                    rule: i,
                    field: "destination",
                });
            }
            if rule.source == rule.destination {
                return Err(PolicyError::SameContainer {
                    rule: i,
                    container: rule.source.clone(),
                });
            }
            if rule.max_age_days == 0 {
                return Err(PolicyError::ZeroThreshold { rule: i });
            }
        }
        for (i, rule) in self.purge.iter().enumerate() {
            if rule.container.is_empty() {
                return Err(PolicyError::EmptyContainer {
                    rule: i,
                    field: "container",
                });
            }
            if rule.max_age_days == 0 {
                return Err(PolicyError::ZeroThreshold { rule: i });
            }
        }
        Ok(())
    }

    /// Returns `true` when the policy contains no rules at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty() && self.purge.is_empty()
    }
}
