//! Storage backend implementations.
//!
//! This module provides concrete implementations of `TodoRepository` from
//! `todos_core::storage`. The implementations are selected at compile time
//! via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): in-memory backend for tests and local development
//! - `dynamodb`: AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! # Examples
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p todos --features dynamodb
//! ```

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbTodoRepository;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryTodoRepository;
