use std::fmt;

use thiserror::Error;
use url::Url;

/// Public feed the app points at until the user saves another one.
pub const DEFAULT_SOURCE_URL: &str = "https://tednewardsandbox.site44.com/questions.json";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceUrlError {
    #[error("invalid source URL {raw:?}: {reason}")]
    Malformed { raw: String, reason: String },

    #[error("unsupported scheme {scheme:?} in source URL")]
    UnsupportedScheme { scheme: String },
}

/// Absolute http(s) location of a quiz content feed.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceUrl(Url);

impl SourceUrl {
    /// Validate a user-supplied source location.
    ///
    /// # Errors
    ///
    /// Returns `SourceUrlError` if the input is not an absolute http or https URL.
    pub fn parse(raw: &str) -> Result<Self, SourceUrlError> {
        let url = Url::parse(raw.trim()).map_err(|err| SourceUrlError::Malformed {
            raw: raw.to_string(),
            reason: err.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(SourceUrlError::UnsupportedScheme {
                    scheme: other.to_string(),
                });
            }
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(SourceUrlError::Malformed {
                raw: raw.to_string(),
                reason: "missing host".into(),
            });
        }
        Ok(Self(url))
    }

    #[must_use]
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// # Panics
    ///
    /// Panics if `DEFAULT_SOURCE_URL` stops being a valid URL.
    #[must_use]
    pub fn default_source() -> Self {
        Self(Url::parse(DEFAULT_SOURCE_URL).expect("default source URL should be valid"))
    }
}

impl fmt::Debug for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceUrl({})", self.0)
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(SourceUrl::parse("https://example.com/questions.json").is_ok());
        assert!(SourceUrl::parse("http://127.0.0.1:8080/q").is_ok());
    }

    #[test]
    fn rejects_relative_and_garbage() {
        assert!(matches!(
            SourceUrl::parse("questions.json"),
            Err(SourceUrlError::Malformed { .. })
        ));
        assert!(matches!(
            SourceUrl::parse("not a url"),
            Err(SourceUrlError::Malformed { .. })
        ));
        assert!(matches!(SourceUrl::parse(""), Err(SourceUrlError::Malformed { .. })));
    }

    #[test]
    fn rejects_non_http_schemes() {
        let err = SourceUrl::parse("ftp://example.com/q.json").unwrap_err();
        assert_eq!(
            err,
            SourceUrlError::UnsupportedScheme {
                scheme: "ftp".into()
            }
        );
    }

    #[test]
    fn default_source_matches_constant() {
        assert_eq!(SourceUrl::default_source().as_str(), DEFAULT_SOURCE_URL);
    }
}
