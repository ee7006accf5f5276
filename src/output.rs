//! Console output: match names on stdout, everything else on stderr.

use crate::types::ScanSummary;
use colored::Colorize;
use std::io::{self, Write};

/// Console output handler.
///
/// Stdout carries exactly one line per matched script so it can be piped;
/// the banner and summary go to stderr and only appear in verbose mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOutput {
    verbose: bool,
}

impl ConsoleOutput {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Emit a matched signature name on stdout.
    pub fn print_match(&self, name: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = self.write_match(&mut stdout, name);
    }

    /// Write the line for a matched signature: the name and nothing else.
    pub fn write_match<W: Write>(&self, out: &mut W, name: &str) -> io::Result<()> {
        writeln!(out, "{}", name)
    }

    /// Print scan start message.
    pub fn print_scan_start(&self, target: &str, scripts: usize) {
        if !self.verbose {
            return;
        }

        eprintln!(
            "{} Scanning: {} ({} scripts)",
            "[*]".bright_blue(),
            target.bright_white(),
            scripts
        );
    }

    /// Print scan summary.
    pub fn print_summary(&self, summary: &ScanSummary) {
        if !self.verbose {
            return;
        }

        eprintln!();
        eprintln!("{}", "=== Scan Summary ===".bright_cyan());
        eprintln!("  Target:    {}", summary.target);
        eprintln!("  Duration:  {:.2}s", summary.duration_secs);
        eprintln!("  Scripts:   {}", summary.scripts);
        eprintln!("  Fetched:   {}", summary.fetched);
        if summary.failed > 0 {
            eprintln!("  {}", format!("Failed:    {}", summary.failed).yellow());
        }
        if summary.matched > 0 {
            eprintln!("  {}", format!("Matched:   {}", summary.matched).green().bold());
        } else {
            eprintln!("  {}", "No signatures matched.".dimmed());
        }
        if summary.saved > 0 {
            eprintln!("  Saved:     {}", summary.saved);
        }
        eprintln!();
    }
}
