//! Attachment signer implementations.
//!
//! This module provides concrete implementations of `UploadUrlSigner` from
//! `todos_core::attachments`, selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): deterministic signer for tests and local development
//! - `s3`: Amazon S3 pre-signed `PutObject` URLs using `aws-sdk-s3`

#[cfg(feature = "s3")]
pub mod s3;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "s3")]
pub use s3::S3UploadSigner;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryUploadSigner;
