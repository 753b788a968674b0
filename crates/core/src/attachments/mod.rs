mod error;
mod functions;
mod traits;

pub use error::AttachmentError;
pub use functions::{attachment_url, validate_expiration, MAX_UPLOAD_URL_EXPIRATION};
pub use traits::UploadUrlSigner;
