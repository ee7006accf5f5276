//! On-disk layout for kept scripts: `<root>/<hostname>/<last path segment>`.

use crate::types::{JsSigError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Where `url` is stored under `root`.
pub fn script_file_path(root: &Path, url: &Url) -> Result<PathBuf> {
    let host = url
        .host_str()
        .map(|h| h.trim_start_matches('[').trim_end_matches(']'))
        .filter(|h| !h.is_empty())
        .ok_or_else(|| persist_error(url, "URL has no hostname"))?;

    let segment = url
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or_default();

    let decoded = urlencoding::decode(segment)
        .map_err(|e| persist_error(url, &format!("file name is not UTF-8: {}", e)))?;

    // A decoded %2F still counts as a separator.
    let filename = decoded.rsplit(['/', '\\']).next().unwrap_or_default();
    if filename.is_empty() || filename == "." || filename == ".." {
        return Err(persist_error(url, "URL path has no file name"));
    }

    Ok(root.join(host).join(filename))
}

/// Write `content` to its place under `root`, creating the host directory if needed.
pub async fn save_script(root: &Path, url: &Url, content: &str) -> Result<PathBuf> {
    let path = script_file_path(root, url)?;

    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    tokio::fs::write(&path, content).await?;

    debug!("Saved {} to {}", url, path.display());
    Ok(path)
}

fn persist_error(url: &Url, reason: &str) -> JsSigError {
    JsSigError::PersistError {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}
