//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `MinifyError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi con il path coinvolto
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `PathNotFound`: La root richiesta non esiste (fatale)
//! - `List`: Directory non leggibile durante la traversata
//! - `Read`: Lettura di un file fallita
//! - `Transform`: Il tool di minificazione ha rifiutato il contenuto
//! - `Write`: Riscrittura del file fallita
//! - `Io`: Errori di I/O generici
//! - `MissingDependency`: Tool esterno mancante (svgo, scour)
//!
//! ## Propagazione:
//! - Errori sulla root sono fatali e terminano il processo con exit code 1
//! - Errori su singoli file o sottodirectory vengono loggati e il run continua

use std::path::PathBuf;

/// Custom error types for SVG minification
#[derive(thiserror::Error, Debug)]
pub enum MinifyError {
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("cannot list directory {}: {}", .path.display(), .message)]
    List { path: PathBuf, message: String },

    #[error("cannot read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("transform failed: {0}")]
    Transform(String),

    #[error("cannot write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dependency missing: {0}")]
    MissingDependency(String),
}
