//! Named regex signatures and first-match-wins evaluation.

use crate::types::{JsSigError, MatchOutcome, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// One `[[Signatures]]` entry as written in the signature file.
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureEntry {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Regex", alias = "regex")]
    pub regex: String,
}

/// On-disk signature file layout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignatureFile {
    #[serde(rename = "Signatures", alias = "signatures", default)]
    pub signatures: Vec<SignatureEntry>,
}

/// A signature whose pattern has already been compiled.
#[derive(Debug, Clone)]
pub struct Signature {
    pub name: String,
    pub pattern: Regex,
}

/// Ordered, immutable set of signatures. Declaration order is evaluation order.
#[derive(Debug, Clone, Default)]
pub struct SignatureSet {
    signatures: Vec<Signature>,
}

impl SignatureSet {
    /// Compile `entries`, rejecting empty names and invalid patterns.
    pub fn compile(entries: Vec<SignatureEntry>) -> Result<Self> {
        let mut signatures = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(JsSigError::ConfigError(format!(
                    "signature #{} has an empty name",
                    index + 1
                )));
            }

            let pattern = Regex::new(&entry.regex).map_err(|source| JsSigError::InvalidSignature {
                name: entry.name.clone(),
                source,
            })?;

            signatures.push(Signature {
                name: entry.name,
                pattern,
            });
        }

        Ok(Self { signatures })
    }

    /// Parse and compile a TOML signature document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: SignatureFile = toml::from_str(content)?;
        Self::compile(file.signatures)
    }

    /// Load and compile the signature file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            JsSigError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;

        let set = Self::from_toml_str(&content)?;
        if set.is_empty() {
            warn!("No signatures defined in {}", path.display());
        } else {
            debug!("Loaded {} signatures from {}", set.len(), path.display());
        }

        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.signatures.iter()
    }

    /// Name of the first signature whose pattern occurs anywhere in `content`.
    pub fn first_match(&self, content: &str) -> MatchOutcome {
        self.signatures
            .iter()
            .find(|sig| sig.pattern.is_match(content))
            .map(|sig| MatchOutcome::Matched(sig.name.clone()))
            .unwrap_or(MatchOutcome::NoMatch)
    }
}

/// Match `content` against `signatures`; first match in declaration order wins.
pub fn match_content(content: &str, signatures: &SignatureSet) -> MatchOutcome {
    signatures.first_match(content)
}
