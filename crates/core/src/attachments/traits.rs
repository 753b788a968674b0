use std::time::Duration;

use async_trait::async_trait;

use super::AttachmentError;

/// Issues time-limited upload authorizations for attachment objects.
#[async_trait]
pub trait UploadUrlSigner: Send + Sync {
    /// Returns a pre-signed URL allowing a single upload of `key`.
    ///
    /// The URL stops working once `expires_in` has elapsed.
    async fn presign_upload(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, AttachmentError>;
}
