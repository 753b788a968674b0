use std::time::Duration;

use super::AttachmentError;

/// Longest lifetime a SigV4 pre-signed URL may have (seven days).
pub const MAX_UPLOAD_URL_EXPIRATION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Derives the stable object location from a signed URL.
///
/// The signature lives in the query string, so dropping it leaves the URL the
/// object is served from once uploaded.
///
/// # Example
///
/// ```
/// use todos_core::attachments::attachment_url;
///
/// let signed = "https://bucket.s3.amazonaws.com/t1?X-Amz-Signature=abc";
/// assert_eq!(attachment_url(signed), "https://bucket.s3.amazonaws.com/t1");
/// ```
pub fn attachment_url(signed_url: &str) -> &str {
    signed_url
        .split_once('?')
        .map_or(signed_url, |(location, _)| location)
}

/// Checks that an upload URL lifetime is usable for signing.
pub fn validate_expiration(expires_in: Duration) -> Result<(), AttachmentError> {
    if expires_in.is_zero() || expires_in > MAX_UPLOAD_URL_EXPIRATION {
        return Err(AttachmentError::InvalidExpiration(format!(
            "{}s is outside 1s..={}s",
            expires_in.as_secs(),
            MAX_UPLOAD_URL_EXPIRATION.as_secs()
        )));
    }
    Ok(())
}
