//! # Directory Walker Module
//!
//! Questo modulo gestisce la discovery ricorsiva dei file da minificare.
//!
//! ## Responsabilità:
//! - Traversata ricorsiva della directory root in ordine deterministico
//! - Selezione dei file per estensione (case-insensitive)
//! - Resilienza: una sottodirectory illeggibile viene loggata e saltata,
//!   senza interrompere il resto della traversata
//! - Formattazione human-readable delle dimensioni
//!
//! ## Contratto:
//! - La root deve esistere, altrimenti `MinifyError::PathNotFound`
//! - Ogni file regolare con estensione corrispondente compare esattamente
//!   una volta nel risultato
//! - Entry non regolari (file speciali, symlink rotti) vengono saltate in
//!   silenzio; le directory symlinkate non vengono seguite
//!
//! ## Esempio:
//! ```ignore
//! let files = FileScanner::find_svg_files(Path::new("/path/to/assets"), "svg")?;
//! for file in files {
//!     // process file
//! }
//! ```

use crate::error::MinifyError;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Discovers candidate files and provides size formatting helpers
pub struct FileScanner;

impl FileScanner {
    /// Find all files matching the target extension under `root`.
    ///
    /// Entries are visited in sorted order so output is reproducible. A
    /// directory that cannot be listed produces one diagnostic line and the
    /// walk continues with its siblings. A `root` that is itself a matching
    /// regular file yields exactly that file.
    pub fn find_svg_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, MinifyError> {
        if !root.exists() {
            return Err(MinifyError::PathNotFound(root.to_path_buf()));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file()
                        && Self::matches_extension(entry.path(), extension)
                    {
                        files.push(entry.path().to_path_buf());
                    }
                }
                Err(err) => {
                    let list_error = MinifyError::List {
                        path: err.path().unwrap_or(root).to_path_buf(),
                        message: err
                            .io_error()
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| err.to_string()),
                    };
                    warn!("{}", list_error);
                }
            }
        }

        Ok(files)
    }

    /// Check if a file's extension matches the target (case-insensitive)
    pub fn matches_extension(path: &Path, extension: &str) -> bool {
        if let Some(ext) = path.extension() {
            ext.to_string_lossy().to_lowercase() == extension.to_lowercase()
        } else {
            false
        }
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }

    /// Human-readable size delta, keeping the sign for size increases
    pub fn format_signed_size(delta: i64) -> String {
        if delta < 0 {
            format!("-{}", Self::format_size(delta.unsigned_abs()))
        } else {
            Self::format_size(delta as u64)
        }
    }
}
