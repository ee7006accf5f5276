//! Script reference extraction from HTML documents.

use super::resolver::resolve;
use crate::types::{JsSigError, Result};
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, StartTag, TagToken, Token, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};
use std::cell::RefCell;
use tracing::{debug, warn};
use url::Url;

/// What to do with a `src` value that does not resolve to a URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SrcPolicy {
    /// Abort the whole extraction on the first bad reference.
    #[default]
    FailFast,
    /// Log the bad reference and keep going.
    SkipInvalid,
}

/// Token sink collecting raw `src` values of `<script>` start tags.
///
/// There is no tree builder behind the tokenizer, so the sink itself switches
/// the tokenizer into the raw text states for elements whose content is not
/// markup. Without that, `<script>` bodies would be scanned as tags.
#[derive(Default)]
struct ScriptSrcSink {
    sources: RefCell<Vec<String>>,
}

impl TokenSink for ScriptSrcSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let TagToken(tag) = token else {
            return TokenSinkResult::Continue;
        };
        if tag.kind != StartTag {
            return TokenSinkResult::Continue;
        }

        match &*tag.name {
            "script" => {
                let mut sources = self.sources.borrow_mut();
                for attr in tag.attrs.iter().filter(|a| &*a.name.local == "src") {
                    sources.push(attr.value.to_string());
                }
                TokenSinkResult::RawData(RawKind::ScriptData)
            }
            "style" | "iframe" | "noembed" | "noframes" | "noscript" | "xmp" => {
                TokenSinkResult::RawData(RawKind::Rawtext)
            }
            "textarea" | "title" => TokenSinkResult::RawData(RawKind::Rcdata),
            "plaintext" => TokenSinkResult::Plaintext,
            _ => TokenSinkResult::Continue,
        }
    }
}

/// Raw `src` values of every `<script>` start or self-closing tag, in order.
fn scan_script_sources(html: &str) -> Vec<String> {
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));

    let tokenizer = Tokenizer::new(ScriptSrcSink::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    tokenizer.sink.sources.take()
}

/// Collect every `<script src>` reference in `html`, resolved against `base_url`.
///
/// Inline scripts are ignored, duplicates are kept and document order is
/// preserved. Malformed markup never fails; the scan stops at end of input.
pub fn extract_script_urls(html: &str, base_url: &str) -> Result<Vec<Url>> {
    extract_script_urls_with(html, base_url, SrcPolicy::FailFast)
}

/// [`extract_script_urls`] with an explicit policy for unresolvable `src` values.
pub fn extract_script_urls_with(html: &str, base_url: &str, policy: SrcPolicy) -> Result<Vec<Url>> {
    let base = Url::parse(base_url)?;

    let mut urls = Vec::new();
    for value in scan_script_sources(html) {
        match resolve(&base, &value) {
            Ok(url) => urls.push(url),
            Err(source) => match policy {
                SrcPolicy::FailFast => {
                    return Err(JsSigError::InvalidReference {
                        reference: value,
                        source,
                    });
                }
                SrcPolicy::SkipInvalid => {
                    warn!("Skipping invalid script reference {:?}: {}", value, source);
                }
            },
        }
    }

    debug!("Found {} script references in {}", urls.len(), base);
    Ok(urls)
}
