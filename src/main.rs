//! jssig - JavaScript library fingerprinting by script signatures.
//!
//! CLI entry point.

use jssig::{Config, ConsoleOutput, ContentFetcher, Scanner, SignatureSet};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse_args();

    // Logs go to stderr; stdout only carries matched signature names.
    let filter = if config.verbose {
        EnvFilter::new("jssig=debug,info")
    } else {
        EnvFilter::new("jssig=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some((target, config_path)) = config.required() else {
        println!("{}", jssig::config::USAGE);
        return ExitCode::SUCCESS;
    };

    let signatures = match SignatureSet::from_file(config_path) {
        Ok(s) => s,
        Err(e) => {
            error!("Error reading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let fetcher = match ContentFetcher::new(&config.useragent, config.timeout()) {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let scanner = Scanner::new(fetcher, signatures, config.scan_options())
        .with_console(ConsoleOutput::new(config.verbose));

    if let Err(e) = scanner.scan(target).await {
        error!("Error scanning {}: {}", target, e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
