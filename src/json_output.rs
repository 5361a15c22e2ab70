//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso del tool
//! da parte di altri processi (build pipeline, asset pipeline web).
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio del run con la configurazione effettiva
//! - `file_result`: Esito terminale di un singolo file
//! - `complete`: Fine del run con le statistiche aggregate
//! - `error`: Errore fatale

use crate::config::Config;
use crate::processor::{Outcome, ProcessResult};
use crate::progress::RunSummary;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsonMessage {
    /// Inizio del run di minificazione
    #[serde(rename = "start")]
    Start {
        input_dir: PathBuf,
        total_files: usize,
        config: JsonConfig,
    },

    /// Esito terminale di un singolo file
    #[serde(rename = "file_result")]
    FileResult {
        path: PathBuf,
        original_size: u64,
        optimized_size: u64,
        saved_bytes: i64,
        reduction_percent: f64,
        outcome: String,
        error: Option<String>,
    },

    /// Run completato
    #[serde(rename = "complete")]
    Complete {
        files_processed: usize,
        files_optimized: usize,
        files_skipped: usize,
        errors: usize,
        total_original_size: u64,
        total_optimized_size: u64,
        saved_bytes: i64,
        average_reduction: f64,
        duration_seconds: f64,
    },

    /// Errore fatale
    #[serde(rename = "error")]
    Error {
        message: String,
        details: Option<String>,
    },
}

/// Configurazione per output JSON
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonConfig {
    pub target_extension: String,
    pub multipass: bool,
    pub preserve_viewbox: bool,
    pub preserve_title: bool,
    pub preserve_desc: bool,
    pub strip_dimensions: bool,
    pub sort_attributes: bool,
    pub dry_run: bool,
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    /// Crea un messaggio di inizio
    pub fn start(input_dir: PathBuf, total_files: usize, config: &Config) -> Self {
        Self::Start {
            input_dir,
            total_files,
            config: JsonConfig::from(config),
        }
    }

    /// Crea un messaggio di esito file
    pub fn file_result(result: &ProcessResult) -> Self {
        let (outcome, error) = match &result.outcome {
            Outcome::Optimized => ("optimized".to_string(), None),
            Outcome::Skipped { reason } => ("skipped".to_string(), Some(reason.clone())),
            Outcome::Failed { stage, message } => (
                format!("failed_{}", stage.as_str()),
                Some(message.clone()),
            ),
        };

        Self::FileResult {
            path: result.path.clone(),
            original_size: result.original_size,
            optimized_size: result.optimized_size,
            saved_bytes: result.saved_bytes(),
            reduction_percent: round2(result.reduction_percent()),
            outcome,
            error,
        }
    }

    /// Crea un messaggio di completamento
    pub fn complete(summary: &RunSummary, duration_seconds: f64) -> Self {
        Self::Complete {
            files_processed: summary.files_processed,
            files_optimized: summary.files_optimized,
            files_skipped: summary.files_skipped,
            errors: summary.errors,
            total_original_size: summary.total_original_size,
            total_optimized_size: summary.total_optimized_size,
            saved_bytes: summary.saved_bytes(),
            average_reduction: round2(summary.overall_reduction_percent()),
            duration_seconds,
        }
    }

    /// Crea un messaggio di errore
    pub fn error(message: String, details: Option<String>) -> Self {
        Self::Error { message, details }
    }
}

/// Converti Config in JsonConfig
impl From<&Config> for JsonConfig {
    fn from(config: &Config) -> Self {
        Self {
            target_extension: config.target_extension.clone(),
            multipass: config.transform.multipass,
            preserve_viewbox: config.transform.preserve_viewbox,
            preserve_title: config.transform.preserve_title,
            preserve_desc: config.transform.preserve_desc,
            strip_dimensions: config.transform.strip_dimensions,
            sort_attributes: config.transform.sort_attributes,
            dry_run: config.dry_run,
        }
    }
}

/// Percentuali arrotondate a 2 decimali nei messaggi
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
