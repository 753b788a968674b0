//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of `TodoRepository`
//! using `aws-sdk-dynamodb`. Todos live in a single table keyed by
//! `userId` (hash) and `todoId` (range), with a secondary index on
//! `userId` / `createdAt` for listing a user's todos in creation order.

mod conversions;
mod error;
mod expressions;
mod repository;

pub use repository::DynamoDbTodoRepository;
