//! jssig - JavaScript library fingerprinting by script signatures.
//!
//! Given a page URL, the scanner:
//! - Fetches the page and collects every `<script src>` reference
//! - Resolves each reference against the page URL
//! - Fetches all scripts concurrently
//! - Reports the first signature (in declaration order) each script matches
//!
//! # Example
//!
//! ```no_run
//! use jssig::{ContentFetcher, ScanOptions, Scanner, SignatureSet};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> jssig::Result<()> {
//!     let signatures = SignatureSet::from_toml_str(
//!         "[[Signatures]]\nName = \"jQuery\"\nRegex = 'jQuery v[0-9]'\n",
//!     )?;
//!     let fetcher = ContentFetcher::new("Mozilla/5.0", Duration::from_secs(10))?;
//!     let scanner = Scanner::new(fetcher, signatures, ScanOptions::default());
//!
//!     for report in scanner.scan("https://example.com").await? {
//!         if let Some(name) = report.matched() {
//!             println!("{} -> {}", report.url, name);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod discovery;
pub mod fetcher;
pub mod output;
pub mod persist;
pub mod scanner;
pub mod signatures;
pub mod types;

pub use config::Config;
pub use discovery::{extract_script_urls, resolve, SrcPolicy};
pub use fetcher::ContentFetcher;
pub use output::ConsoleOutput;
pub use scanner::{ScanOptions, Scanner};
pub use signatures::{match_content, Signature, SignatureSet};
pub use types::{
    FetchError, JsSigError, MatchOutcome, Result, ScanSummary, ScriptOutcome, ScriptReport,
};
