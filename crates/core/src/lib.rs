//! Core types and contracts for the todos data-access layer.
//!
//! This crate is the functional core: it holds the todo record types, the
//! storage and attachment traits implemented by the backends in the `todos`
//! crate, and the error types those traits return. Nothing here performs I/O.

pub mod attachments;
pub mod serde;
pub mod storage;
pub mod todo;
