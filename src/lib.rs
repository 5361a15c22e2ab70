//! # SVG Minifier Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e opzioni del minificatore
//! - `error`: Tipi di errore custom per le diverse operazioni
//! - `platform`: Individuazione cross-platform dei tool esterni
//! - `transform`: Seam di trasformazione e delega ai tool esterni
//! - `walker`: Discovery ricorsiva dei file candidati
//! - `processor`: Pipeline read → transform → write per singolo file
//! - `progress`: Progress tracking e statistiche aggregate
//! - `json_output`: Output strutturato per uso programmatico
//! - `optimizer`: Orchestratore principale del run
//!
//! ## Utilizzo:
//! ```ignore
//! use svg_minifier::{Config, SvgOptimizer};
//!
//! let config = Config::default();
//! let optimizer = SvgOptimizer::new(config).await?;
//! let summary = optimizer.run(&root).await?;
//! ```

pub mod config;
pub mod error;
pub mod platform;
pub mod transform;
pub mod walker;
pub mod processor;
pub mod progress;
pub mod json_output;
pub mod optimizer;

pub use config::{Config, TransformOptions};
pub use error::MinifyError;
pub use optimizer::SvgOptimizer;
pub use processor::{FileProcessor, Outcome, ProcessResult};
pub use progress::RunSummary;
pub use transform::{SvgTransform, ToolTransformer};
pub use walker::FileScanner;
