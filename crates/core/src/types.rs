use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blob descriptor as yielded by a container listing.
///
/// Listings are a point-in-time view: a blob may be modified or deleted
/// between the listing and any later per-blob call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobEntry {
    /// Blob name (path within the container). Unique per container.
    pub name: String,

    /// Last-modified instant as reported by the listing, when the service
    /// includes it. The sweep engine decides eligibility from a fresh
    /// [`BlobProperties`] fetch, not from this field.
    pub last_modified: Option<DateTime<Utc>>,

    /// Size in bytes, when the listing includes it.
    pub size_bytes: Option<u64>,
}

impl BlobEntry {
    /// Create an entry carrying only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_modified: None,
            size_bytes: None,
        }
    }
}

/// Authoritative blob metadata from a dedicated properties fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobProperties {
    /// When the blob content was last modified (UTC).
    pub last_modified: DateTime<Utc>,

    /// Content size in bytes.
    pub size_bytes: u64,

    /// MIME content type, if the service reports one.
    pub content_type: Option<String>,

    /// Entity tag for the current blob version, if the service reports one.
    pub etag: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_entry_has_no_metadata() {
        let entry = BlobEntry::named("logs/2026/08/app.log");
        assert_eq!(entry.name, "logs/2026/08/app.log");
        assert!(entry.last_modified.is_none());
        assert!(entry.size_bytes.is_none());
    }

    #[test]
    fn entry_serde_roundtrip() {
        let entry = BlobEntry {
            name: "reports/latest.json".into(),
            last_modified: Some(Utc::now()),
            size_bytes: Some(2_048),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: BlobEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn properties_serde_roundtrip() {
        let props = BlobProperties {
            last_modified: Utc::now(),
            size_bytes: 512,
            content_type: Some("application/json".into()),
            etag: Some("\"0x8DBAD\"".into()),
        };
        let json = serde_json::to_string(&props).unwrap();
        let back: BlobProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(back, props);
    }
}
