//! Core types and errors for the signature scanner.

use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Errors that can occur while loading signatures, discovering scripts or
/// persisting them.
#[derive(Error, Debug)]
pub enum JsSigError {
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid script reference {reference:?}: {source}")]
    InvalidReference {
        reference: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Fetch failed: {0}")]
    FetchError(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Signature {name:?} has an invalid pattern: {source}")]
    InvalidSignature {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cannot persist {url}: {reason}")]
    PersistError { url: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, JsSigError>;

/// Why a single GET did not produce a body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request/response cycle exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-2xx status.
    #[error("HTTP request failed with status code: {code}")]
    BadStatus { code: u16 },

    /// DNS, connection, TLS or body transfer failure.
    #[error("network error: {cause}")]
    Network { cause: String },

    /// The URL could not be turned into a request (unsupported scheme, ...).
    #[error("invalid request URL: {cause}")]
    InvalidUrl { cause: String },
}

/// Result of testing one script against the signature set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    NoMatch,
    /// Name of the first signature, in declaration order, that matched.
    Matched(String),
}

impl MatchOutcome {
    pub fn name(&self) -> Option<&str> {
        match self {
            MatchOutcome::Matched(name) => Some(name.as_str()),
            MatchOutcome::NoMatch => None,
        }
    }
}

/// What happened to one script during the fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptOutcome {
    /// The script could not be retrieved; nothing else was attempted.
    FetchFailed(FetchError),
    /// The unit's task panicked or was aborted before finishing.
    Aborted(String),
    /// The script was retrieved and matched.
    Fetched {
        matched: Option<String>,
        /// Where the script was written, when persistence was requested and succeeded.
        saved: Option<PathBuf>,
    },
}

/// Per-script report returned by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReport {
    pub url: Url,
    pub outcome: ScriptOutcome,
}

impl ScriptReport {
    pub fn matched(&self) -> Option<&str> {
        match &self.outcome {
            ScriptOutcome::Fetched { matched, .. } => matched.as_deref(),
            _ => None,
        }
    }
}

/// Counts derived from a finished run, shown in verbose mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanSummary {
    pub target: String,
    pub scripts: usize,
    pub fetched: usize,
    pub failed: usize,
    pub matched: usize,
    pub saved: usize,
    pub duration_secs: f64,
}

impl ScanSummary {
    pub fn from_reports(target: &str, reports: &[ScriptReport], duration_secs: f64) -> Self {
        let mut summary = Self {
            target: target.to_string(),
            scripts: reports.len(),
            duration_secs,
            ..Default::default()
        };

        for report in reports {
            match &report.outcome {
                ScriptOutcome::Fetched { matched, saved } => {
                    summary.fetched += 1;
                    if matched.is_some() {
                        summary.matched += 1;
                    }
                    if saved.is_some() {
                        summary.saved += 1;
                    }
                }
                ScriptOutcome::FetchFailed(_) | ScriptOutcome::Aborted(_) => summary.failed += 1,
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(path: &str, outcome: ScriptOutcome) -> ScriptReport {
        ScriptReport {
            url: Url::parse(&format!("https://example.com/{}", path)).unwrap(),
            outcome,
        }
    }

    #[test]
    fn test_summary_counts() {
        let reports = vec![
            report(
                "a.js",
                ScriptOutcome::Fetched {
                    matched: Some("jQuery".to_string()),
                    saved: Some(PathBuf::from("example.com/a.js")),
                },
            ),
            report("b.js", ScriptOutcome::FetchFailed(FetchError::BadStatus { code: 404 })),
            report(
                "c.js",
                ScriptOutcome::Fetched {
                    matched: None,
                    saved: None,
                },
            ),
        ];

        let summary = ScanSummary::from_reports("https://example.com", &reports, 1.5);
        assert_eq!(summary.scripts, 3);
        assert_eq!(summary.fetched, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.saved, 1);
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::BadStatus { code: 404 };
        assert_eq!(err.to_string(), "HTTP request failed with status code: 404");
        assert_eq!(report("x.js", ScriptOutcome::FetchFailed(err)).matched(), None);
    }
}
