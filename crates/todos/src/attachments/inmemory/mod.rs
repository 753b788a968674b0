//! In-memory attachment signer for testing.

mod signer;

pub use signer::InMemoryUploadSigner;
