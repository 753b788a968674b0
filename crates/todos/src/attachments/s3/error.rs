//! S3 error mapping.
//!
//! Maps AWS SDK errors to `AttachmentError` from `todos_core::attachments`.

use std::fmt::Debug;

use aws_sdk_s3::error::{DisplayErrorContext, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::presigning::PresigningConfigError;
use todos_core::attachments::AttachmentError;

/// Map a presigning configuration error to AttachmentError.
pub fn map_presigning_config_error(err: PresigningConfigError) -> AttachmentError {
    AttachmentError::InvalidExpiration(err.to_string())
}

/// Map a PutObject presigning error to AttachmentError.
pub fn map_presign_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutObjectError, R>,
) -> AttachmentError {
    AttachmentError::Presign(DisplayErrorContext(&err).to_string())
}
