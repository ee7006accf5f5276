//! Scanner orchestrating the page fetch and the per-script fan-out.

use crate::discovery::{extract_script_urls_with, SrcPolicy};
use crate::fetcher::ContentFetcher;
use crate::output::ConsoleOutput;
use crate::persist::save_script;
use crate::signatures::SignatureSet;
use crate::types::{Result, ScanSummary, ScriptOutcome, ScriptReport};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};
use url::Url;

/// Options controlling what each script unit does.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Write every fetched script under `output_dir`.
    pub keep_files: bool,
    /// Root directory for kept scripts.
    pub output_dir: PathBuf,
    /// Maximum number of scripts in flight; `None` launches all at once.
    pub concurrency: Option<usize>,
    /// How to treat `src` values that do not resolve.
    pub src_policy: SrcPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            keep_files: false,
            output_dir: PathBuf::from("."),
            concurrency: None,
            src_policy: SrcPolicy::FailFast,
        }
    }
}

/// Fetches a page, discovers its scripts and matches each against the signatures.
pub struct Scanner {
    fetcher: Arc<ContentFetcher>,
    signatures: Arc<SignatureSet>,
    options: Arc<ScanOptions>,
    console: ConsoleOutput,
}

impl Scanner {
    pub fn new(fetcher: ContentFetcher, signatures: SignatureSet, options: ScanOptions) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            signatures: Arc::new(signatures),
            options: Arc::new(options),
            console: ConsoleOutput::default(),
        }
    }

    pub fn with_console(mut self, console: ConsoleOutput) -> Self {
        self.console = console;
        self
    }

    /// Scan a single target URL: fetch it, extract its scripts and fan out.
    ///
    /// Failures fetching the page or extracting references are returned;
    /// failures on individual scripts only show up in their reports.
    pub async fn scan(&self, target: &str) -> Result<Vec<ScriptReport>> {
        let start_time = Instant::now();

        let html = self.fetcher.fetch(target).await?;
        let script_urls = extract_script_urls_with(&html, target, self.options.src_policy)?;
        self.console.print_scan_start(target, script_urls.len());

        let reports = self.run(script_urls).await;

        let summary = ScanSummary::from_reports(target, &reports, start_time.elapsed().as_secs_f64());
        self.console.print_summary(&summary);

        Ok(reports)
    }

    /// Launch one task per script URL and wait for all of them.
    ///
    /// Reports come back in input order; matched names are printed by each
    /// task as soon as it finishes, so stdout order is unspecified.
    pub async fn run(&self, script_urls: Vec<Url>) -> Vec<ScriptReport> {
        let limiter = self
            .options
            .concurrency
            .filter(|&n| n > 0)
            .map(|n| Arc::new(Semaphore::new(n)));

        let tasks: Vec<_> = script_urls
            .into_iter()
            .map(|url| {
                let fetcher = self.fetcher.clone();
                let signatures = self.signatures.clone();
                let options = self.options.clone();
                let console = self.console;
                let limiter = limiter.clone();
                let task_url = url.clone();

                let handle = tokio::spawn(async move {
                    let _permit = match limiter {
                        Some(semaphore) => semaphore.acquire_owned().await.ok(),
                        None => None,
                    };
                    scan_script(&task_url, &fetcher, &signatures, &options, console).await
                });

                (url, handle)
            })
            .collect();

        let (urls, handles): (Vec<_>, Vec<_>) = tasks.into_iter().unzip();
        let results = futures::future::join_all(handles).await;

        urls.into_iter()
            .zip(results)
            .map(|(url, result)| {
                let outcome = match result {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!("Task for {} did not complete: {}", url, e);
                        ScriptOutcome::Aborted(e.to_string())
                    }
                };
                ScriptReport { url, outcome }
            })
            .collect()
    }
}

/// Work for one script: fetch, match, optionally persist.
///
/// Every failure is logged here and never leaves the unit.
async fn scan_script(
    url: &Url,
    fetcher: &ContentFetcher,
    signatures: &SignatureSet,
    options: &ScanOptions,
    console: ConsoleOutput,
) -> ScriptOutcome {
    let content = match fetcher.fetch(url.as_str()).await {
        Ok(content) => content,
        Err(e) => {
            warn!("Error downloading JavaScript from {}: {}", url, e);
            return ScriptOutcome::FetchFailed(e);
        }
    };

    let matched = signatures.first_match(&content).name().map(str::to_string);
    match matched {
        Some(ref name) => {
            debug!("{} matched signature {}", url, name);
            console.print_match(name);
        }
        None => debug!("{} matched no signature", url),
    }

    let mut saved = None;
    if options.keep_files {
        match save_script(&options.output_dir, url, &content).await {
            Ok(path) => saved = Some(path),
            Err(e) => warn!("Error saving JavaScript from {}: {}", url, e),
        }
    }

    ScriptOutcome::Fetched { matched, saved }
}
