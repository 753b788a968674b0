use thiserror::Error;

/// Errors that can occur while authorizing an attachment upload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("Invalid URL expiration: {0}")]
    InvalidExpiration(String),
    #[error("Presigning failed: {0}")]
    Presign(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_expiration_display() {
        let error = AttachmentError::InvalidExpiration("0s".to_string());
        assert_eq!(error.to_string(), "Invalid URL expiration: 0s");
    }

    #[test]
    fn test_presign_display() {
        let error = AttachmentError::Presign("no credentials".to_string());
        assert_eq!(error.to_string(), "Presigning failed: no credentials");
    }
}
