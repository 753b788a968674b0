//! Serde helper functions for client-supplied payloads.
//!
//! Web clients tend to send `""` for an optional field they left blank. These
//! helpers fold that into `None` so an empty value is never stored.

use serde::{Deserialize, Deserializer};

use crate::todo::non_blank;

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(non_blank(s))
}
