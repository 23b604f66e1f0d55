//! Fetches the bytes behind a resolved [`Location`], either from disk or
//! over HTTP. Ported from `original_source/builder/builder.go`'s
//! `downloadFile` plus its local-file read path.

use std::time::Duration;

use super::location::Location;
use crate::cache;
use crate::error::{CodegenError, Result};

/// Abstraction over "get me the bytes at this location", so the loader
/// (C4) can be tested against an in-memory fetcher instead of touching the
/// network or filesystem.
pub trait Fetcher {
    fn fetch(&self, loc: &Location) -> Result<Vec<u8>>;
}

/// Default fetcher: reads `Location::File` from disk, GETs `Location::Url`
/// over HTTP. The codegen pipeline runs synchronously (invoked from
/// `build.rs` or the CLI, neither of which has a tokio runtime to hand), so
/// this uses `reqwest::blocking` rather than the async client the runtime
/// crate uses for actual SOAP calls.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_invalid_certs_accepted(false)
    }

    /// `danger_accept_invalid_certs` toggle, surfaced by the CLI's `-i`
    /// flag for internal WSDL endpoints behind self-signed certificates.
    pub fn with_invalid_certs_accepted(accept_invalid_certs: bool) -> Self {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .expect("reqwest client configuration is valid");
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, loc: &Location) -> Result<Vec<u8>> {
        match loc {
            Location::File(path) => std::fs::read(path).map_err(|e| CodegenError::FileRead {
                path: path.clone(),
                source: e,
            }),
            Location::Url(url) => {
                let key = loc.to_string();
                if let Some(cached) = cache::read(&key) {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("serving '{}' from the schema cache", key);
                    return Ok(cached);
                }

                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .map_err(|e| CodegenError::Fetch {
                        location: loc.to_string(),
                        status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                    })?;

                if !response.status().is_success() {
                    return Err(CodegenError::Fetch {
                        location: loc.to_string(),
                        status: response.status().as_u16(),
                    });
                }

                let bytes = response
                    .bytes()
                    .map(|b| b.to_vec())
                    .map_err(|e| CodegenError::Fetch {
                        location: loc.to_string(),
                        status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                    })?;

                cache::write(&key, &bytes);
                Ok(bytes)
            }
        }
    }
}
