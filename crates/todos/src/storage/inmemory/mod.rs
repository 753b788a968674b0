//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of `TodoRepository` that
//! stores all records in a map wrapped in `Arc<RwLock<_>>`. It follows the
//! semantics of the DynamoDB backend, including partial records created by
//! writes to missing keys, so it can stand in for the table in tests and
//! local development.
//!
//! # Example
//!
//! ```rust,ignore
//! use todos::storage::inmemory::InMemoryTodoRepository;
//!
//! let repo = InMemoryTodoRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryTodoRepository;
