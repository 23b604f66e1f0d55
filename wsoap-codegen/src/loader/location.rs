//! Resolves WSDL/XSD `schemaLocation`/`location` references, which may be
//! absolute URLs, absolute file paths, or paths relative to the document
//! that referenced them. Ported from `original_source/builder/location.go`.

use std::path::{Path, PathBuf};

use crate::error::{CodegenError, Result};

/// Either a URL or an absolute file path. `location.go`'s `location` type
/// distinguishes the two cases explicitly rather than normalizing them into
/// a common representation, since resolving a relative reference against
/// each one works differently (`url::Url::join` vs `Path` manipulation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Url(url::Url),
    File(PathBuf),
}

impl Location {
    /// Parse a raw location string. A string with a URL scheme (`http://`,
    /// `file://`, ...) becomes `Location::Url`; anything else is treated as
    /// a file path and canonicalized to absolute (without requiring the
    /// file to exist yet, since the caller may be constructing a location
    /// for a schema that has not been fetched).
    pub fn parse(raw: &str) -> Result<Self> {
        if let Ok(parsed) = url::Url::parse(raw) {
            if !parsed.scheme().is_empty() && parsed.scheme().len() > 1 {
                return Ok(Location::Url(parsed));
            }
        }

        let path = Path::new(raw);
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| CodegenError::InvalidWsdl(format!("cannot resolve cwd: {e}")))?
                .join(path)
        };
        Ok(Location::File(absolute))
    }

    /// Resolve `reference` against `self`, mirroring `location.go`'s
    /// `Parse`: a URL location resolves relative references via
    /// `Url::join`; a file location resolves them against its own parent
    /// directory, unless `reference` is itself absolute or is itself a URL.
    pub fn join(&self, reference: &str) -> Result<Self> {
        match self {
            Location::Url(base) => {
                let joined = base
                    .join(reference)
                    .map_err(|e| CodegenError::InvalidWsdl(format!("invalid location '{reference}': {e}")))?;
                Ok(Location::Url(joined))
            }
            Location::File(base) => {
                let ref_path = Path::new(reference);
                if ref_path.is_absolute() {
                    return Ok(Location::File(ref_path.to_path_buf()));
                }
                if let Ok(parsed) = url::Url::parse(reference) {
                    if !parsed.scheme().is_empty() && parsed.scheme().len() > 1 {
                        return Ok(Location::Url(parsed));
                    }
                }
                let dir = base.parent().unwrap_or_else(|| Path::new("."));
                Ok(Location::File(dir.join(ref_path)))
            }
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Location::File(_))
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Location::Url(_))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::Url(u) => write!(f, "{u}"),
            Location::File(p) => write!(f, "{}", p.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_location() {
        let loc = Location::parse("http://example.com/a.wsdl").unwrap();
        assert!(loc.is_url());
    }

    #[test]
    fn parses_relative_file_as_absolute() {
        let loc = Location::parse("a.wsdl").unwrap();
        assert!(loc.is_file());
        if let Location::File(p) = loc {
            assert!(p.is_absolute());
        }
    }

    #[test]
    fn joins_relative_reference_against_url() {
        let base = Location::parse("http://example.com/dir/a.wsdl").unwrap();
        let joined = base.join("b.xsd").unwrap();
        assert_eq!(joined.to_string(), "http://example.com/dir/b.xsd");
    }

    #[test]
    fn joins_relative_reference_against_file() {
        let base = Location::File(PathBuf::from("/tmp/wsdl/a.wsdl"));
        let joined = base.join("schemas/b.xsd").unwrap();
        assert_eq!(joined.to_string(), "/tmp/wsdl/schemas/b.xsd");
    }

    #[test]
    fn absolute_reference_wins_over_base() {
        let base = Location::File(PathBuf::from("/tmp/wsdl/a.wsdl"));
        let joined = base.join("/etc/b.xsd").unwrap();
        assert_eq!(joined.to_string(), "/etc/b.xsd");
    }
}
