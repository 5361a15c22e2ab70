//! # SVG Minifier - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Validazione della directory di input
//! - Creazione della configurazione e avvio dell'optimizer
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (directory, extension, dry-run, json, verbose)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose)
//! 3. Valida che la directory esista e sia una directory
//! 4. Crea un oggetto Config e istanzia SvgOptimizer
//! 5. Avvia il run; i fallimenti sui singoli file non cambiano l'exit code
//!
//! ## Esempio di utilizzo:
//! ```bash
//! svg-minifier /path/to/assets --dry-run --verbose
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use svg_minifier::{Config, SvgOptimizer, TransformOptions};

#[derive(Parser)]
#[command(name = "svg-minifier")]
#[command(about = "Minify SVG files in place and report size savings")]
struct Args {
    /// Directory containing SVG files to minify
    directory: PathBuf,

    /// File extension to match, without leading dot (case-insensitive)
    #[arg(short, long, default_value = "svg")]
    extension: String,

    /// Dry run - report savings without rewriting files
    #[arg(long)]
    dry_run: bool,

    /// Emit machine-readable JSON events instead of human output
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Validate arguments
    if !args.directory.exists() {
        return Err(anyhow::anyhow!(
            "Directory does not exist: {}",
            args.directory.display()
        ));
    }

    if !args.directory.is_dir() {
        return Err(anyhow::anyhow!(
            "Path is not a directory: {}",
            args.directory.display()
        ));
    }

    let config = Config {
        target_extension: args.extension,
        transform: TransformOptions::default(),
        dry_run: args.dry_run,
        json_output: args.json,
    };

    let optimizer = SvgOptimizer::new(config).await?;
    optimizer.run(&args.directory).await?;

    Ok(())
}
