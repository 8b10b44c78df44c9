//! Cache Entry Module
//!
//! Derives the on-disk identity of a cached image from its source URL.

use sha2::{Digest, Sha256};
use url::Url;

use crate::error::Result;

/// Extension used when the source URL path has none.
pub const DEFAULT_EXTENSION: &str = ".jpg";

// == Cache Key ==
/// Identifies a cache entry: a digest of the raw URL plus the URL's path extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    /// Hex-encoded digest of the raw URL string
    pub digest: String,
    /// Extension including the leading dot, e.g. `.png`
    pub extension: String,
}

impl CacheKey {
    // == Constructor ==
    /// Derives the key for `raw_url`.
    ///
    /// The digest covers the string exactly as received, so two spellings of
    /// the same resource get two entries. Fails if the URL cannot be parsed.
    pub fn from_url(raw_url: &str) -> Result<Self> {
        let parsed = Url::parse(raw_url)?;
        let extension =
            path_extension(parsed.path()).unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        Ok(Self {
            digest: digest_hex(raw_url),
            extension,
        })
    }

    /// File name of the entry inside the cache directory.
    pub fn file_name(&self) -> String {
        format!("{}{}", self.digest, self.extension)
    }

    /// Content type served for a cache hit, inferred from the extension.
    pub fn content_type(&self) -> &'static str {
        content_type_for_extension(&self.extension)
    }
}

// == Utility Functions ==
/// Hex digest of the raw URL bytes.
pub fn digest_hex(raw_url: &str) -> String {
    hex::encode(Sha256::digest(raw_url.as_bytes()))
}

/// Extension of the last path segment, including the dot.
///
/// Trailing slashes are ignored, so `/cat.png/` yields `.png`. Dotfiles
/// (`/.hidden`) and trailing dots (`/file.`) have no extension.
pub fn path_extension(path: &str) -> Option<String> {
    let segment = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let dot = segment.rfind('.')?;
    if dot == 0 || dot + 1 == segment.len() {
        return None;
    }
    Some(segment[dot..].to_string())
}

/// Maps an image extension to its MIME type.
pub fn content_type_for_extension(extension: &str) -> &'static str {
    match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}
