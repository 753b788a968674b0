//! Deterministic upload URLs without credentials.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use todos_core::attachments::{validate_expiration, AttachmentError, UploadUrlSigner};

/// Default endpoint, matching a LocalStack S3 container.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4566";

/// Issues URLs shaped like path-style S3 pre-signed URLs.
///
/// The signature is a random token, so the URLs authorize nothing. Useful
/// wherever a real bucket is not available.
#[derive(Debug, Clone)]
pub struct InMemoryUploadSigner {
    endpoint: String,
    bucket_name: String,
}

impl InMemoryUploadSigner {
    /// Creates a signer issuing URLs under `DEFAULT_ENDPOINT`.
    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT, bucket_name)
    }

    /// Creates a signer issuing URLs under a custom endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>, bucket_name: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            bucket_name: bucket_name.into(),
        }
    }

    /// Get the bucket name.
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// The unsigned location of an object.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket_name, key)
    }
}

#[async_trait]
impl UploadUrlSigner for InMemoryUploadSigner {
    async fn presign_upload(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, AttachmentError> {
        validate_expiration(expires_in)?;

        Ok(format!(
            "{}?X-Amz-Date={}&X-Amz-Expires={}&X-Amz-Signature={}&x-id=PutObject",
            self.object_url(key),
            Utc::now().format("%Y%m%dT%H%M%SZ"),
            expires_in.as_secs(),
            Uuid::new_v4().simple()
        ))
    }
}
