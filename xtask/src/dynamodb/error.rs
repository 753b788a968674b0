//! Error types for DynamoDB provisioning.

use thiserror::Error;

/// Result type alias for dynamodb module.
pub type Result<T> = std::result::Result<T, DynamodbError>;

/// Errors that can occur while provisioning the todos table.
#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("Table '{table_name}' is keyed by {found}, expected {expected}")]
    KeyMismatch {
        table_name: String,
        expected: String,
        found: String,
    },

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Timeout waiting for table '{0}' to become active")]
    TableActivationTimeout(String),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mismatch_message() {
        let err = DynamodbError::KeyMismatch {
            table_name: "Todos".to_string(),
            expected: "userId/todoId".to_string(),
            found: "PK/SK".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Table 'Todos' is keyed by PK/SK, expected userId/todoId"
        );
    }
}
