use blobsweep_store::StoreError;

/// Classify an Azure SDK error string into a [`StoreError`].
///
/// The SDK surfaces service failures as formatted error strings; this
/// inspects them for the status codes and error-code keywords the storage
/// service uses. `blob_name` provides the context for the not-found
/// variants: when absent, a 404 is attributed to the container.
pub fn classify_azure_error(
    error_str: &str,
    container: &str,
    blob_name: Option<&str>,
) -> StoreError {
    let lower = error_str.to_lowercase();

    if lower.contains("401")
        || lower.contains("403")
        || lower.contains("authenticationfailed")
        || lower.contains("authorizationfailure")
        || lower.contains("unauthorized")
        || lower.contains("forbidden")
        || lower.contains("credential")
    {
        return StoreError::Authorization(error_str.to_owned());
    }

    if lower.contains("containernotfound") || lower.contains("container does not exist") {
        return StoreError::ContainerNotFound(container.to_owned());
    }

    if lower.contains("404") || lower.contains("blobnotfound") || lower.contains("not found") {
        return match blob_name {
            Some(blob_name) => StoreError::BlobNotFound {
                container: container.to_owned(),
                blob_name: blob_name.to_owned(),
            },
            None => StoreError::ContainerNotFound(container.to_owned()),
        };
    }

    if lower.contains("timeout")
        || lower.contains("timed out")
        || lower.contains("connection")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("network")
    {
        return StoreError::Connectivity(error_str.to_owned());
    }

    StoreError::Transfer(error_str.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_authorization_by_status() {
        let err = classify_azure_error("HTTP 403: Server failed to authorize", "hot", None);
        assert!(matches!(err, StoreError::Authorization(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn classify_authorization_by_code() {
        let err = classify_azure_error(
            "AuthenticationFailed: signature did not match",
            "hot",
            Some("a.log"),
        );
        assert!(matches!(err, StoreError::Authorization(_)));
    }

    #[test]
    fn classify_container_not_found() {
        let err = classify_azure_error(
            "ContainerNotFound: The specified container does not exist",
            "hot",
            Some("a.log"),
        );
        assert!(matches!(err, StoreError::ContainerNotFound(c) if c == "hot"));
    }

    #[test]
    fn classify_blob_not_found_with_context() {
        let err = classify_azure_error(
            "BlobNotFound: The specified blob does not exist (404)",
            "hot",
            Some("logs/a.log"),
        );
        match err {
            StoreError::BlobNotFound {
                container,
                blob_name,
            } => {
                assert_eq!(container, "hot");
                assert_eq!(blob_name, "logs/a.log");
            }
            other => panic!("expected BlobNotFound, got: {other}"),
        }
    }

    #[test]
    fn classify_404_without_blob_context_is_container() {
        let err = classify_azure_error("HTTP 404: resource not found", "hot", None);
        assert!(matches!(err, StoreError::ContainerNotFound(_)));
    }

    #[test]
    fn classify_connection() {
        let err = classify_azure_error("Connection refused: 10.0.0.1:443", "hot", None);
        assert!(matches!(err, StoreError::Connectivity(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn classify_timeout_as_connectivity() {
        let err = classify_azure_error("Request timed out after 30s", "hot", Some("a"));
        assert!(matches!(err, StoreError::Connectivity(_)));
    }

    #[test]
    fn classify_generic_service_error_as_transfer() {
        let err = classify_azure_error(
            "OperationNotAllowedOnArchiveTier: copy rejected",
            "hot",
            Some("a"),
        );
        assert!(matches!(err, StoreError::Transfer(_)));
        assert!(!err.is_retryable());
    }
}
