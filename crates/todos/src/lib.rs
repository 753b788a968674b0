//! Data-access layer for the todos application.
//!
//! [`TodoStore`] exposes five operations over two external services: a
//! document table holding todo records and an object store holding their
//! attachments. Each operation maps to a single remote request.
//!
//! Backends are picked with feature flags: `dynamodb` and `s3` for AWS,
//! `inmemory` (default) for tests and local development. `aws` enables both
//! AWS backends together with `TodoStore::from_env`.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use todos::attachments::InMemoryUploadSigner;
//! use todos::storage::InMemoryTodoRepository;
//! use todos::{TodoItem, TodoStore, TodoStoreConfig};
//!
//! let config = TodoStoreConfig::from_env()?;
//! let store = TodoStore::new(
//!     Arc::new(InMemoryTodoRepository::new()),
//!     Arc::new(InMemoryUploadSigner::new(&config.bucket_name)),
//!     config,
//! );
//!
//! let todo = store.create(TodoItem::new("u1", "buy milk")).await?;
//! let url = store.get_upload_url(&todo.todo_id, "u1").await?;
//! ```

pub mod attachments;
pub mod config;
pub mod storage;
mod store;

pub use config::{ConfigError, TodoStoreConfig};
pub use store::{Result, TodoStore, TodoStoreError};
pub use todos_core::todo::{DeleteStatus, TodoItem, TodoUpdate};
