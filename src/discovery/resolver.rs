//! Absolute URL resolution for script references.

use url::{ParseError, Url};

/// Resolve `reference` against the document URL `base`.
///
/// Absolute references come back normalized; relative ones (path, scheme
/// relative, query or fragment only) inherit the base scheme and authority
/// and get their path merged with dot segments removed.
pub fn resolve(base: &Url, reference: &str) -> Result<Url, ParseError> {
    base.join(reference)
}

/// Same as [`resolve`], parsing the base URL first.
pub fn resolve_str(base: &str, reference: &str) -> Result<Url, ParseError> {
    let base = Url::parse(base)?;
    resolve(&base, reference)
}
