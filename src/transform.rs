//! # SVG Transform Module
//!
//! Questo modulo incapsula la minificazione vera e propria, delegata
//! esclusivamente a tool esterni specializzati. Il contenuto del file entra
//! come bytes e ne esce minificato, oppure l'operazione fallisce: nessun
//! parsing SVG viene fatto in-process.
//!
//! ## Architettura
//!
//! - **Vantaggi**:
//!   - Nessuna dipendenza pesante da librerie XML Rust
//!   - Utilizza tool maturi e altamente ottimizzati (svgo, scour)
//!   - Fallback automatico quando un tool non è disponibile
//!
//! - **Svantaggi**:
//!   - Richiede tool esterni installati nel sistema
//!   - Overhead di process spawning per ogni file
//!
//! ## Strategia Tool Selection (priorità decrescente)
//!
//! 1. **svgo**: Supporto completo delle opzioni, configurato tramite un
//!    file di configurazione generato all'avvio
//! 2. **scour**: Fallback con supporto parziale delle opzioni (ignora
//!    multipass e l'ordinamento degli attributi)
//! 3. **Fallback**: Errore se nessun tool è disponibile
//!
//! ## Contratto
//!
//! Il minificatore riceve l'intero contenuto via stdin e restituisce
//! l'output completo via stdout. Exit status diverso da zero significa
//! input rifiutato (malformato) e il file originale resta intatto.

use crate::config::TransformOptions;
use crate::error::MinifyError;
use crate::platform::PlatformCommands;
use anyhow::Result;
use std::io::Write;
use std::process::Stdio;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

/// Content transformation seam.
///
/// The processing pipeline only depends on this trait, so tests can inject
/// deterministic transforms without any external tool installed.
pub trait SvgTransform {
    /// Rewrite `content` into its minified form.
    ///
    /// Implementations must either return the complete new content or fail;
    /// callers guarantee the original file is left untouched on failure.
    fn transform(
        &self,
        content: &[u8],
    ) -> impl std::future::Future<Output = Result<Vec<u8>, MinifyError>> + Send;
}

/// Production transformer backed by external minification tools.
///
/// The options are fixed when the transformer is built and forwarded
/// unchanged on every invocation.
pub struct ToolTransformer {
    options: TransformOptions,
    /// Generated svgo configuration, kept alive for the whole run
    svgo_config: NamedTempFile,
}

impl ToolTransformer {
    /// Build a transformer for the given options.
    ///
    /// Writes the svgo configuration file once; the file lives in the
    /// system temp directory and is removed when the transformer is dropped.
    pub fn new(options: TransformOptions) -> Result<Self> {
        let mut svgo_config = tempfile::Builder::new()
            .prefix("svg-minifier-")
            .suffix(".config.cjs")
            .tempfile()?;

        svgo_config
            .as_file_mut()
            .write_all(svgo_config_contents(&options).as_bytes())?;
        svgo_config.as_file_mut().flush()?;

        debug!(
            "Generated svgo configuration at {}",
            svgo_config.path().display()
        );

        Ok(Self {
            options,
            svgo_config,
        })
    }

    /// Checks that at least one minification tool is installed.
    ///
    /// Mirrors the policy used for every external dependency in this tool:
    /// individual tools may be missing, but a run cannot start with none.
    pub async fn check_dependencies() -> Result<()> {
        let platform = PlatformCommands::instance();

        info!("🔧 Checking SVG minification tool dependencies...");

        let tools = [
            ("svgo", "SVG minification (full option support)"),
            ("scour", "SVG minification (fallback, partial options)"),
        ];

        let mut available = Vec::new();
        for (tool, description) in &tools {
            if platform.is_command_available(tool).await {
                info!("  ✅ {} - {}", tool, description);
                available.push(*tool);
            } else {
                warn!("  ❌ {} - {}", tool, description);
            }
        }

        if available.is_empty() {
            let message =
                "No SVG minification tools available! Please install svgo (npm) or scour (pip)";
            error!("{}", message);
            return Err(MinifyError::MissingDependency(message.to_string()).into());
        }

        info!(
            "🎯 Tool dependency check passed - using {}",
            available.join(", ")
        );
        Ok(())
    }

    /// Run svgo with the generated configuration, piping stdin to stdout.
    async fn run_svgo(&self, content: &[u8]) -> Result<Vec<u8>, MinifyError> {
        let command = PlatformCommands::instance().get_command("svgo");

        let mut child = Command::new(command)
            .arg("--config")
            .arg(self.svgo_config.path())
            .args(["-i", "-", "-o", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MinifyError::Transform(format!("failed to spawn svgo: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(content)
                .await
                .map_err(|e| MinifyError::Transform(format!("failed to pipe input to svgo: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| MinifyError::Transform(format!("svgo did not complete: {e}")))?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(MinifyError::Transform(format!(
                "svgo rejected the input: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }

    /// Run scour as a stdin/stdout filter.
    async fn run_scour(&self, content: &[u8]) -> Result<Vec<u8>, MinifyError> {
        let command = PlatformCommands::instance().get_command("scour");

        let mut child = Command::new(command)
            .args(scour_args(&self.options))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| MinifyError::Transform(format!("failed to spawn scour: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(content).await.map_err(|e| {
                MinifyError::Transform(format!("failed to pipe input to scour: {e}"))
            })?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| MinifyError::Transform(format!("scour did not complete: {e}")))?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            Err(MinifyError::Transform(format!(
                "scour rejected the input: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )))
        }
    }
}

impl SvgTransform for ToolTransformer {
    async fn transform(&self, content: &[u8]) -> Result<Vec<u8>, MinifyError> {
        let platform = PlatformCommands::instance();
        let mut last_error = None;

        if platform.is_command_available("svgo").await {
            match self.run_svgo(content).await {
                Ok(output) => return Ok(output),
                Err(e) => {
                    warn!("svgo failed, trying next tool: {}", e);
                    last_error = Some(e);
                }
            }
        }

        if platform.is_command_available("scour").await {
            match self.run_scour(content).await {
                Ok(output) => return Ok(output),
                Err(e) => {
                    warn!("scour failed: {}", e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            MinifyError::MissingDependency(
                "no SVG minification tool available (install svgo or scour)".to_string(),
            )
        }))
    }
}

/// Render the svgo configuration file for the given options.
fn svgo_config_contents(options: &TransformOptions) -> String {
    let mut overrides = Vec::new();
    if options.preserve_viewbox {
        overrides.push("          removeViewBox: false");
    }
    if options.preserve_title {
        overrides.push("          removeTitle: false");
    }
    if options.preserve_desc {
        overrides.push("          removeDesc: false");
    }

    let mut plugins = vec![format!(
        "    {{\n      name: 'preset-default',\n      params: {{\n        overrides: {{\n{}\n        }}\n      }}\n    }}",
        overrides.join(",\n")
    )];
    if options.strip_dimensions {
        plugins.push("    'removeDimensions'".to_string());
    }
    if options.sort_attributes {
        plugins.push("    'sortAttrs'".to_string());
    }

    format!(
        "module.exports = {{\n  multipass: {},\n  plugins: [\n{}\n  ]\n}};\n",
        options.multipass,
        plugins.join(",\n")
    )
}

/// Build the scour argument list for the given options.
///
/// Scour has no equivalent for `multipass` or `sort_attributes`; those are
/// silently ignored, the same way a lossless-only JPEG tool ignores a
/// quality setting.
fn scour_args(options: &TransformOptions) -> Vec<String> {
    let mut args = vec![
        "--quiet".to_string(),
        "--indent=none".to_string(),
        "--enable-comment-stripping".to_string(),
    ];

    if options.strip_dimensions {
        args.push("--enable-viewboxing".to_string());
    }
    if !options.preserve_title && !options.preserve_desc {
        args.push("--remove-descriptive-elements".to_string());
    }

    args
}
