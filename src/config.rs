//! Command-line configuration.

use crate::discovery::SrcPolicy;
use crate::fetcher::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use crate::scanner::ScanOptions;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Long flags that are also accepted with a single leading dash.
const LEGACY_FLAGS: &[&str] = &[
    "url",
    "config",
    "keepjs",
    "useragent",
    "timeout",
    "concurrency",
    "skip-invalid-src",
    "output-dir",
    "verbose",
];

pub const USAGE: &str =
    "Usage: jssig -url <URL> -config <config-file> [-keepjs] [-useragent <user-agent>]";

/// Identify the JavaScript libraries a web page loads by matching its scripts
/// against named regex signatures.
#[derive(Parser, Debug, Clone)]
#[command(name = "jssig")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// URL to scan
    #[arg(long)]
    pub url: Option<String>,

    /// Path to the TOML signature file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep fetched JavaScript files, one directory per host
    #[arg(long)]
    pub keepjs: bool,

    /// User agent to use
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub useragent: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Maximum scripts fetched at once (0 = no limit)
    #[arg(long, default_value_t = 0)]
    pub concurrency: usize,

    /// Skip script references that do not parse instead of aborting
    #[arg(long)]
    pub skip_invalid_src: bool,

    /// Directory kept scripts are written under
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse the process arguments, accepting `-flag` as well as `--flag`.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args()))
    }

    /// The target URL and signature file, if both were given.
    pub fn required(&self) -> Option<(&str, &PathBuf)> {
        match (self.url.as_deref(), self.config.as_ref()) {
            (Some(url), Some(config)) if !url.is_empty() => Some((url, config)),
            _ => None,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Scan options derived from the flags.
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            keep_files: self.keepjs,
            output_dir: self.output_dir.clone(),
            concurrency: (self.concurrency > 0).then_some(self.concurrency),
            src_policy: if self.skip_invalid_src {
                SrcPolicy::SkipInvalid
            } else {
                SrcPolicy::FailFast
            },
        }
    }
}

/// Rewrite `-url x` / `-url=x` style flags to their `--` form.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            let Some(rest) = arg.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }

            let name = rest.split_once('=').map(|(name, _)| name).unwrap_or(rest);
            if LEGACY_FLAGS.contains(&name) {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}
