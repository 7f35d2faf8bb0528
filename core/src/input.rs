//! Input resolution and output naming
//!
//! Kept apart from the renderer so rendering never touches the filesystem
//! except for the final write.

use std::path::{Path, PathBuf};

use crate::constants::OUTPUT_FILE_PREFIX;
use crate::export::OutputFormat;
use crate::{Error, Result};

/// Message bytes plus the file they came from, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub message: Vec<u8>,
    pub source_path: Option<PathBuf>,
}

/// Treat `text_or_path` as a file path if such a file exists, else as text.
pub fn resolve_input(text_or_path: &str) -> Result<ResolvedInput> {
    let path = expand_tilde(text_or_path);
    if path.is_file() {
        let text = std::fs::read_to_string(&path)
            .map_err(|e| Error::Input(format!("cannot read {}: {}", path.display(), e)))?;
        tracing::debug!("read {} bytes of message text from {}", text.len(), path.display());
        return Ok(ResolvedInput {
            message: text.into_bytes(),
            source_path: Some(path),
        });
    }

    Ok(ResolvedInput {
        message: text_or_path.as_bytes().to_vec(),
        source_path: None,
    })
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(path),
        },
        _ => PathBuf::from(path),
    }
}

/// Desktop, else home, else the working directory
pub fn default_output_dir() -> PathBuf {
    dirs::desktop_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `<dir>/<file stem>.<ext>` for file inputs, `<dir>/qr_<index>.<ext>` for
/// text, with the index zero-padded to four digits.
pub fn destination_for(dir: &Path, index: usize, input: &ResolvedInput, format: OutputFormat) -> PathBuf {
    let stem = input
        .source_path
        .as_deref()
        .and_then(Path::file_stem)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{}{:04}", OUTPUT_FILE_PREFIX, index));

    dir.join(format!("{}.{}", stem, format.extension()))
}
