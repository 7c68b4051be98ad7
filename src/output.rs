//! Timestamped menu output.
//!
//! The document is staged in a temporary file next to its destination and
//! only then moved into place, so a failed run never leaves a partial file.
use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use std::io::Write;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "winemenu";
const FILE_EXTENSION: &str = "pdf";

/// `winemenu-YYYYMMDD_HHMMSS.pdf`; fixed width, so names sort by time.
pub fn menu_file_name<Tz: TimeZone>(generated_at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{FILE_PREFIX}-{}.{FILE_EXTENSION}",
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Write `bytes` to a fresh timestamped file in `out_dir` and return its path.
///
/// Refuses to replace an existing file.
pub fn write_menu(out_dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
    write_menu_at(out_dir, bytes, &Local::now())
}

fn write_menu_at<Tz: TimeZone>(
    out_dir: &Path,
    bytes: &[u8],
    generated_at: &DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    let dest = out_dir.join(menu_file_name(generated_at));
    let mut staged = tempfile::Builder::new()
        .prefix(".winemenu-")
        .suffix(".tmp")
        .tempfile_in(out_dir)
        .with_context(|| format!("create staging file in {}", out_dir.display()))?;
    staged
        .write_all(bytes)
        .with_context(|| format!("write {}", staged.path().display()))?;
    staged
        .as_file()
        .sync_all()
        .with_context(|| format!("sync {}", staged.path().display()))?;
    staged
        .persist_noclobber(&dest)
        .map_err(|err| err.error)
        .with_context(|| format!("publish {}", dest.display()))?;
    tracing::info!(path = %dest.display(), bytes = bytes.len(), "menu written");
    Ok(dest)
}
