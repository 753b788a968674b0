//! S3 attachment signer.
//!
//! Attachments are stored in a single bucket with the todo ID as object key.
//! Clients upload straight to S3 using a pre-signed `PutObject` URL.

mod error;
mod signer;

pub use signer::S3UploadSigner;
