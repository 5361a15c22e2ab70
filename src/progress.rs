//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e le statistiche del run.
//!
//! ## Responsabilità:
//! - Progress bar visual con `indicatif` per feedback real-time
//! - Accumulo dei `ProcessResult` in un `RunSummary` aggregato
//! - Calcolo dei byte risparmiati (con segno) e della riduzione percentuale
//!
//! ## Statistiche tracciate:
//! - **files_processed**: Totale file elaborati
//! - **files_optimized**: File effettivamente riscritti
//! - **files_skipped**: File saltati (file vuoti)
//! - **errors**: Numero di errori durante il processing
//! - **total_original_size / total_optimized_size**: Byte prima e dopo
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:02] [========================>---------------] 93/150 (62%) ✓ icon.svg: 41.2% saved
//! ```

use crate::processor::{Outcome, ProcessResult};
use crate::walker::FileScanner;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages progress reporting for a minification run
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update progress with a message
    pub fn update(&self, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }

    /// Finish with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Aggregate statistics for one full tree traversal.
///
/// Both size totals are kept so the aggregate saving stays signed: a run
/// dominated by pessimizing transforms legitimately reports a negative
/// saving and a negative percentage.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files_processed: usize,
    pub files_optimized: usize,
    pub files_skipped: usize,
    pub errors: usize,
    pub total_original_size: u64,
    pub total_optimized_size: u64,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one per-file result into the aggregate
    pub fn add(&mut self, result: &ProcessResult) {
        self.files_processed += 1;
        self.total_original_size += result.original_size;
        self.total_optimized_size += result.optimized_size;

        match &result.outcome {
            Outcome::Optimized => self.files_optimized += 1,
            Outcome::Skipped { .. } => self.files_skipped += 1,
            Outcome::Failed { .. } => self.errors += 1,
        }
    }

    /// Total bytes saved across the run; negative when outputs grew
    pub fn saved_bytes(&self) -> i64 {
        self.total_original_size as i64 - self.total_optimized_size as i64
    }

    pub fn overall_reduction_percent(&self) -> f64 {
        if self.total_original_size > 0 {
            self.saved_bytes() as f64 / self.total_original_size as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Minified: {} | Skipped: {} | Errors: {} | Total saved: {} ({:.2}%)",
            self.files_processed,
            self.files_optimized,
            self.files_skipped,
            self.errors,
            FileScanner::format_signed_size(self.saved_bytes()),
            self.overall_reduction_percent()
        )
    }
}
