//! Digest file persistence.
//!
//! One Markdown file per date, `<digest_dir>/<YYYY-MM-DD>.md`. Same-day
//! reruns overwrite the file; the caller guarantees the content was fully
//! validated before this module is ever invoked.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, instrument};

use crate::error::Result;

/// Write the rendered digest, creating the directory if needed.
///
/// Returns the path of the written file for logging.
#[instrument(level = "info", skip_all, fields(dir = %digest_dir.display(), %date))]
pub async fn write_digest(digest_dir: &Path, date: &str, markdown: &str) -> Result<PathBuf> {
    fs::create_dir_all(digest_dir).await?;
    let path = digest_dir.join(format!("{date}.md"));
    fs::write(&path, markdown).await?;
    info!(path = %path.display(), bytes = markdown.len(), "Wrote digest file");
    Ok(path)
}
