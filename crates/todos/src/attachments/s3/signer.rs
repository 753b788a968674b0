//! S3 pre-signed upload URLs.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use todos_core::attachments::{validate_expiration, AttachmentError, UploadUrlSigner};

use super::error::{map_presign_error, map_presigning_config_error};
use crate::config::TodoStoreConfig;

/// Signs S3 `PutObject` requests for attachment uploads.
///
/// Signing happens locally with the client's credentials; no request is sent
/// to S3.
#[derive(Debug, Clone)]
pub struct S3UploadSigner {
    client: Client,
    bucket_name: String,
}

impl S3UploadSigner {
    /// Creates a new signer for the given S3 client and bucket.
    pub fn new(client: Client, bucket_name: impl Into<String>) -> Self {
        Self {
            client,
            bucket_name: bucket_name.into(),
        }
    }

    /// Creates a new signer for the bucket named in `config`.
    pub fn from_config(client: Client, config: &TodoStoreConfig) -> Self {
        Self::new(client, &config.bucket_name)
    }

    /// Get the bucket name.
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

#[async_trait]
impl UploadUrlSigner for S3UploadSigner {
    async fn presign_upload(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, AttachmentError> {
        validate_expiration(expires_in)?;
        let presigning =
            PresigningConfig::expires_in(expires_in).map_err(map_presigning_config_error)?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(map_presign_error)?;

        Ok(request.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::config::{Credentials, Region};

    use super::*;

    /// Presigning is local, so a client with static credentials never hits the network.
    fn local_client() -> Client {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version_latest()
            .region(Region::new("us-east-1"))
            .endpoint_url("http://localhost:4566")
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .force_path_style(true)
            .build();
        Client::from_conf(config)
    }

    #[tokio::test]
    async fn test_presigned_url_targets_bucket_and_key() {
        let signer = S3UploadSigner::new(local_client(), "todos-attachments");

        let url = signer
            .presign_upload("t1", Duration::from_secs(300))
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:4566/todos-attachments/t1?"));
        assert!(url.contains("X-Amz-Signature="));
        assert!(url.contains("X-Amz-Expires=300"));
    }

    #[tokio::test]
    async fn test_zero_expiration_is_rejected() {
        let signer = S3UploadSigner::new(local_client(), "todos-attachments");

        let result = signer.presign_upload("t1", Duration::ZERO).await;

        assert!(matches!(result, Err(AttachmentError::InvalidExpiration(_))));
    }

    #[test]
    fn test_from_config_uses_bucket() {
        let config = TodoStoreConfig {
            table_name: "Todos".to_string(),
            index_name: "CreatedAtIndex".to_string(),
            bucket_name: "todos-attachments".to_string(),
            url_expiration_seconds: 300,
        };

        let signer = S3UploadSigner::from_config(local_client(), &config);

        assert_eq!(signer.bucket_name(), "todos-attachments");
    }
}
