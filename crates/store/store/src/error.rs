use thiserror::Error;

/// Errors that can occur during object storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The service rejected the credentials.
    #[error("authorization rejected: {0}")]
    Authorization(String),

    /// The service could not be reached (network, DNS, timeout).
    #[error("service unreachable: {0}")]
    Connectivity(String),

    /// The named container does not exist.
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// The named blob does not exist. Can occur between a listing and the
    /// per-blob properties fetch, which is a second round-trip.
    #[error("blob not found: {container}/{blob_name}")]
    BlobNotFound {
        /// Container that was addressed.
        container: String,
        /// Blob that was missing.
        blob_name: String,
    },

    /// A copy or delete was rejected by the service.
    #[error("transfer rejected: {0}")]
    Transfer(String),

    /// The backend was given invalid configuration.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl StoreError {
    /// Returns `true` if the error is transient and the operation may
    /// succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(StoreError::Connectivity("reset".into()).is_retryable());
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!StoreError::Authorization("expired".into()).is_retryable());
        assert!(!StoreError::ContainerNotFound("hot".into()).is_retryable());
        assert!(
            !StoreError::BlobNotFound {
                container: "hot".into(),
                blob_name: "a.log".into(),
            }
            .is_retryable()
        );
        assert!(!StoreError::Transfer("rejected".into()).is_retryable());
        assert!(!StoreError::Configuration("bad".into()).is_retryable());
    }

    #[test]
    fn error_display() {
        let err = StoreError::ContainerNotFound("hot".into());
        assert_eq!(err.to_string(), "container not found: hot");

        let err = StoreError::BlobNotFound {
            container: "hot".into(),
            blob_name: "logs/a.log".into(),
        };
        assert_eq!(err.to_string(), "blob not found: hot/logs/a.log");

        let err = StoreError::Authorization("credential expired".into());
        assert_eq!(err.to_string(), "authorization rejected: credential expired");
    }
}
