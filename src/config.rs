//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri del run
//! - Definisce `TransformOptions`, le opzioni fisse passate al minificatore
//! - Fornisce validazione dei parametri di input
//! - Fornisce valori di default sensati per tutti i parametri
//!
//! ## Parametri di configurazione:
//! - `target_extension`: Estensione dei file da processare (default: "svg")
//! - `transform`: Opzioni del minificatore, fissate all'avvio
//! - `dry_run`: Flag per simulazione senza modifiche (default: false)
//! - `json_output`: Output strutturato JSON invece che human-readable
//!
//! ## Esempio:
//! ```ignore
//! let config = Config {
//!     dry_run: true,
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Configuration for a minification run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// File extension to match, without leading dot (case-insensitive)
    pub target_extension: String,
    /// Fixed minifier options, passed through unchanged on every invocation
    pub transform: TransformOptions,
    /// Dry run - report savings without rewriting files
    pub dry_run: bool,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
}

/// Options forwarded to the external minification tool.
///
/// The defaults mirror the tool's standard profile: multiple passes until the
/// output stabilizes, keep `viewBox`/`title`/`desc` intact for accessibility
/// and responsive scaling, drop fixed `width`/`height` attributes, and sort
/// attributes for better gzip behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Re-run the minifier until the output stops shrinking
    pub multipass: bool,
    /// Keep the root viewBox attribute
    pub preserve_viewbox: bool,
    /// Keep <title> elements
    pub preserve_title: bool,
    /// Keep <desc> elements
    pub preserve_desc: bool,
    /// Remove fixed width/height attributes from the root element
    pub strip_dimensions: bool,
    /// Sort element attributes alphabetically
    pub sort_attributes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_extension: "svg".to_string(),
            transform: TransformOptions::default(),
            dry_run: false,
            json_output: false,
        }
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            multipass: true,
            preserve_viewbox: true,
            preserve_title: true,
            preserve_desc: true,
            strip_dimensions: true,
            sort_attributes: true,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.target_extension.is_empty() {
            return Err(anyhow::anyhow!("Target extension must not be empty"));
        }

        if self.target_extension.starts_with('.') {
            return Err(anyhow::anyhow!(
                "Target extension must not include the leading dot: {}",
                self.target_extension
            ));
        }

        Ok(())
    }
}
