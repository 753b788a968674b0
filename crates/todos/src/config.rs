use std::{env, time::Duration};

use thiserror::Error;

/// Environment variable holding the todos table name.
pub const TABLE_ENV: &str = "TODOS_TABLE";
/// Environment variable holding the creation-time index name.
pub const INDEX_ENV: &str = "TODOS_CREATED_AT_INDEX";
/// Environment variable holding the attachments bucket name.
pub const BUCKET_ENV: &str = "ATTACHMENT_S3_BUCKET";
/// Environment variable holding the upload URL lifetime, in seconds.
pub const EXPIRATION_ENV: &str = "SIGNED_URL_EXPIRATION";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid SIGNED_URL_EXPIRATION value '{0}': expected a positive number of seconds")]
    InvalidExpiration(String),
}

/// Configuration of the todos data-access layer.
///
/// Loaded once at startup and handed to the store and its backends; nothing
/// reads the environment after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoStoreConfig {
    /// Name of the document table holding todo records.
    pub table_name: String,
    /// Name of the secondary index ordering a user's todos by `createdAt`.
    pub index_name: String,
    /// Name of the bucket holding attachments.
    pub bucket_name: String,
    /// Lifetime of upload URLs in seconds.
    pub url_expiration_seconds: u64,
}

impl TodoStoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables (all required):
    /// - `TODOS_TABLE` - Todos table name
    /// - `TODOS_CREATED_AT_INDEX` - Creation-time index name
    /// - `ATTACHMENT_S3_BUCKET` - Attachments bucket name
    /// - `SIGNED_URL_EXPIRATION` - Upload URL lifetime in seconds
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let expiration = required(EXPIRATION_ENV)?;
        let url_expiration_seconds = match expiration.trim().parse::<u64>() {
            Ok(seconds) if seconds > 0 => seconds,
            _ => return Err(ConfigError::InvalidExpiration(expiration)),
        };

        Ok(Self {
            table_name: required(TABLE_ENV)?,
            index_name: required(INDEX_ENV)?,
            bucket_name: required(BUCKET_ENV)?,
            url_expiration_seconds,
        })
    }

    /// Get the upload URL lifetime as a Duration.
    pub fn url_expiration(&self) -> Duration {
        Duration::from_secs(self.url_expiration_seconds)
    }
}
