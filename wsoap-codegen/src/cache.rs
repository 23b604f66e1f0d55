//! A small on-disk cache for fetched XSD/WSDL schemas, so re-running
//! codegen against the same remote WSDL doesn't refetch every import over
//! the network. Ported from `original_source/builder/builder.go`'s
//! `cacheDir`/`os.MkdirAll(cacheDir, 0700)`.
//!
//! The cache directory lives under the OS temp directory and outlives any
//! single generator run; entries are keyed by the fetched location's
//! canonical string (`Location::to_string()`), hashed into a filename.

use std::hash::{Hash, Hasher};
use std::path::PathBuf;

use crate::error::{CodegenError, Result};

/// Directory name under the OS temp dir holding cached schema fetches.
const CACHE_DIR_NAME: &str = "wsoap-codegen-cache";

/// Returns the cache directory path without creating it.
pub fn cache_dir() -> PathBuf {
    std::env::temp_dir().join(CACHE_DIR_NAME)
}

/// Creates the cache directory (and any missing parents) with `0700`
/// permissions if it doesn't already exist. Called once at the start of
/// [`crate::SoapClientGenerator::generate`].
#[cfg(unix)]
pub fn ensure_cache_dir() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = cache_dir();
    std::fs::create_dir_all(&dir).map_err(|e| CodegenError::FileWrite {
        path: dir.clone(),
        source: e,
    })?;
    std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o700)).map_err(|e| {
        CodegenError::FileWrite {
            path: dir.clone(),
            source: e,
        }
    })?;
    Ok(())
}

#[cfg(not(unix))]
pub fn ensure_cache_dir() -> Result<()> {
    let dir = cache_dir();
    std::fs::create_dir_all(&dir).map_err(|e| CodegenError::FileWrite {
        path: dir.clone(),
        source: e,
    })
}

/// Maps a location's canonical string to a cache filename. Uses a hash
/// rather than the raw string since a URL/path can contain characters
/// (`/`, `:`, `?`) that aren't valid in a single path component.
pub fn cache_key(canonical_location: &str) -> PathBuf {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    canonical_location.hash(&mut hasher);
    cache_dir().join(format!("{:016x}.cache", hasher.finish()))
}

/// Reads a previously cached fetch for `canonical_location`, if present.
pub fn read(canonical_location: &str) -> Option<Vec<u8>> {
    std::fs::read(cache_key(canonical_location)).ok()
}

/// Writes a fetch's bytes to the cache, keyed by `canonical_location`.
/// Best-effort: a write failure (e.g. a race on the cache directory)
/// doesn't fail the fetch that produced the bytes.
pub fn write(canonical_location: &str, bytes: &[u8]) {
    let _ = std::fs::write(cache_key(canonical_location), bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_stable_for_same_input() {
        let a = cache_key("http://example.com/a.wsdl");
        let b = cache_key("http://example.com/a.wsdl");
        assert_eq!(a, b);
    }

    #[test]
    fn cache_key_differs_for_different_input() {
        let a = cache_key("http://example.com/a.wsdl");
        let b = cache_key("http://example.com/b.wsdl");
        assert_ne!(a, b);
    }

    #[test]
    fn cache_dir_lives_under_temp_dir() {
        assert!(cache_dir().starts_with(std::env::temp_dir()));
    }
}
