use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on accepted filename length; generated names sit well below
/// this, so anything longer was not produced by us.
const MAX_NAME_LEN: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid thumbnail filename")]
pub struct InvalidThumbnailName;

/// A validated thumbnail filename.
///
/// Names are restricted to a conservative allow-list with no path
/// separators and no leading dot, so joining one onto the storage root can
/// never address a file outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailName(String);

impl ThumbnailName {
    /// Validate an externally supplied filename, e.g. from a URL path.
    pub fn parse(raw: &str) -> Result<Self, InvalidThumbnailName> {
        if raw.is_empty() || raw.len() > MAX_NAME_LEN {
            return Err(InvalidThumbnailName);
        }
        if raw.starts_with('.') || raw.contains("..") {
            return Err(InvalidThumbnailName);
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(InvalidThumbnailName);
        }

        Ok(Self(raw.to_string()))
    }

    /// Mint a fresh name: a UTC timestamp plus a random suffix, so two
    /// requests landing in the same second never overwrite each other.
    #[must_use]
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix: u32 = rand::random();
        Self(format!(
            "thumbnail_{}_{suffix:08x}.jpg",
            now.format("%Y%m%d_%H%M%S")
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ThumbnailName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A freshly generated thumbnail, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedThumbnail {
    /// Filename under the storage root.
    pub filename: String,
    /// Server-relative URL the image can be fetched from.
    pub url: String,
}
