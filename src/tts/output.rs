//! Output path resolution and audio persistence.

use crate::{Error, ErrorContext, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Expand a leading `~` and make the path absolute against the current
/// directory.
pub fn resolve_output_path(path: &Path) -> Result<PathBuf> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs_next::home_dir().ok_or_else(|| {
                Error::validation_with_context(
                    "Cannot expand '~': home directory is unknown",
                    ErrorContext::new()
                        .with_field_path("--output")
                        .with_details(path.display().to_string()),
                )
            })?;
            home.join(rest)
        }
        Err(_) => path.to_path_buf(),
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(std::env::current_dir()?.join(expanded))
    }
}

/// Create missing parent directories and write `audio`, replacing any
/// existing file.
pub fn write_audio(path: &Path, audio: &[u8]) -> Result<u64> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, audio)?;
    Ok(audio.len() as u64)
}
