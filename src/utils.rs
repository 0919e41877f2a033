//! Small helpers: log-safe truncation and output-directory validation.

use std::error::Error as StdError;
use std::fs as stdfs;

use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Model responses can be hundreds of kilobytes; log lines should not be.
/// Strings longer than `max` bytes keep their head with `…(+N bytes)`
/// appended. Truncation is byte-based, so `max` must land on a char boundary
/// for multi-byte content to be preserved intact; callers pass generous
/// ASCII-safe limits.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if absent, then probes it with a create-and-delete
/// of a throwaway file. Run before any network work so a bad output path
/// fails in milliseconds instead of after minutes of generation.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn StdError>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
