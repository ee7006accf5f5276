//! Script discovery.
//!
//! Turns a fetched HTML document into the absolute URLs of the scripts it
//! references.

pub mod extractor;
pub mod resolver;

pub use extractor::{extract_script_urls, extract_script_urls_with, SrcPolicy};
pub use resolver::{resolve, resolve_str};
