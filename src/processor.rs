//! # File Processing Module
//!
//! Worker per la riscrittura di un singolo file.
//!
//! ## Responsabilità:
//! - Pipeline read → transform → write per un singolo file
//! - Scrittura atomica: file temporaneo nella stessa directory + rename,
//!   così sul disco c'è sempre il contenuto vecchio completo o quello nuovo
//! - Produce un `ProcessResult` per ogni file, senza mai abortire il run
//!
//! ## Stati terminali per file:
//! `Optimized`, `Skipped` (file vuoto), `Failed` (read, transform o write).
//! Nessun retry.

use crate::error::MinifyError;
use crate::transform::SvgTransform;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Stage at which processing of a file failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    Read,
    Transform,
    Write,
}

impl FailedStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Transform => "transform",
            Self::Write => "write",
        }
    }
}

/// Terminal outcome of processing one file
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// File rewritten in place with the transformer output
    Optimized,
    /// File intentionally left untouched
    Skipped { reason: String },
    /// Processing failed; the file is byte-identical to before the run
    Failed { stage: FailedStage, message: String },
}

/// Outcome of processing a single file, immutable after creation.
///
/// Sizes are encoded byte lengths of the content, not character counts. For
/// skipped and failed files `optimized_size` equals `original_size`, since
/// the bytes on disk are unchanged.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub path: PathBuf,
    pub original_size: u64,
    pub optimized_size: u64,
    pub outcome: Outcome,
}

impl ProcessResult {
    /// Bytes saved by the rewrite; negative when the transform grew the file
    pub fn saved_bytes(&self) -> i64 {
        self.original_size as i64 - self.optimized_size as i64
    }

    /// Size reduction as a percentage of the original size.
    ///
    /// Negative for a pessimizing transform. Zero-byte originals never reach
    /// this computation (they are skipped before transforming), but the
    /// guard keeps the value finite for any caller.
    pub fn reduction_percent(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            self.saved_bytes() as f64 / self.original_size as f64 * 100.0
        }
    }

    pub fn is_optimized(&self) -> bool {
        self.outcome == Outcome::Optimized
    }
}

/// Rewrites single files through an injected transform
pub struct FileProcessor<T: SvgTransform> {
    transform: T,
    dry_run: bool,
}

impl<T: SvgTransform> FileProcessor<T> {
    pub fn new(transform: T, dry_run: bool) -> Self {
        Self { transform, dry_run }
    }

    /// Process one file and report its terminal state.
    ///
    /// Failures are captured in the result instead of propagating, so one
    /// bad file never interrupts the rest of the run. On any failure the
    /// file on disk is byte-identical to before the call.
    pub async fn process(&self, path: &Path) -> ProcessResult {
        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) => {
                return ProcessResult {
                    path: path.to_path_buf(),
                    original_size: 0,
                    optimized_size: 0,
                    outcome: Outcome::Failed {
                        stage: FailedStage::Read,
                        message: MinifyError::Read {
                            path: path.to_path_buf(),
                            source: e,
                        }
                        .to_string(),
                    },
                };
            }
        };

        let original_size = content.len() as u64;

        if content.is_empty() {
            return ProcessResult {
                path: path.to_path_buf(),
                original_size,
                optimized_size: original_size,
                outcome: Outcome::Skipped {
                    reason: "empty file".to_string(),
                },
            };
        }

        let output = match self.transform.transform(&content).await {
            Ok(output) => output,
            Err(e) => {
                let inner = match e {
                    MinifyError::Transform(message) => message,
                    other => other.to_string(),
                };
                return ProcessResult {
                    path: path.to_path_buf(),
                    original_size,
                    optimized_size: original_size,
                    outcome: Outcome::Failed {
                        stage: FailedStage::Transform,
                        message: format!("cannot transform {}: {}", path.display(), inner),
                    },
                };
            }
        };

        let optimized_size = output.len() as u64;

        if self.dry_run {
            debug!("Dry run: would rewrite {}", path.display());
            return ProcessResult {
                path: path.to_path_buf(),
                original_size,
                optimized_size,
                outcome: Outcome::Optimized,
            };
        }

        if let Err(e) = write_atomic(path, &output) {
            return ProcessResult {
                path: path.to_path_buf(),
                original_size,
                optimized_size: original_size,
                outcome: Outcome::Failed {
                    stage: FailedStage::Write,
                    message: MinifyError::Write {
                        path: path.to_path_buf(),
                        source: e,
                    }
                    .to_string(),
                },
            };
        }

        ProcessResult {
            path: path.to_path_buf(),
            original_size,
            optimized_size,
            outcome: Outcome::Optimized,
        }
    }
}

/// Replace `path` with `data` without ever exposing a partial write.
///
/// The temp file lives in the destination directory so the final rename
/// stays on one filesystem and is atomic.
fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path).map(|_| ()).map_err(|e| e.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Transform that always returns a fixed output
    struct FixedTransform(Vec<u8>);

    impl SvgTransform for FixedTransform {
        async fn transform(&self, _content: &[u8]) -> Result<Vec<u8>, MinifyError> {
            Ok(self.0.clone())
        }
    }

    /// Transform that always fails
    struct FailingTransform;

    impl SvgTransform for FailingTransform {
        async fn transform(&self, _content: &[u8]) -> Result<Vec<u8>, MinifyError> {
            Err(MinifyError::Transform("malformed input".to_string()))
        }
    }

    fn write_fixture(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_successful_rewrite_reports_on_disk_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_fixture(&temp_dir, "a.svg", &[b'x'; 100]);

        let processor = FileProcessor::new(FixedTransform(vec![b'y'; 60]), false);
        let result = processor.process(&path).await;

        assert!(result.is_optimized());
        assert_eq!(result.original_size, 100);
        assert_eq!(result.optimized_size, 60);
        assert_eq!(result.saved_bytes(), 40);
        assert!((result.reduction_percent() - 40.0).abs() < f64::EPSILON);

        // Reported size matches what actually landed on disk
        let on_disk = fs::read(&path).unwrap();
        assert_eq!(on_disk.len() as u64, result.optimized_size);
        assert_eq!(on_disk, vec![b'y'; 60]);
    }

    #[tokio::test]
    async fn test_transform_failure_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let original = b"<svg><rect/></svg>".to_vec();
        let path = write_fixture(&temp_dir, "bad.svg", &original);

        let processor = FileProcessor::new(FailingTransform, false);
        let result = processor.process(&path).await;

        assert!(matches!(
            result.outcome,
            Outcome::Failed {
                stage: FailedStage::Transform,
                ..
            }
        ));
        assert_eq!(result.saved_bytes(), 0);
        assert_eq!(fs::read(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_read_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.svg");

        let processor = FileProcessor::new(FixedTransform(vec![]), false);
        let result = processor.process(&missing).await;

        assert!(matches!(
            result.outcome,
            Outcome::Failed {
                stage: FailedStage::Read,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_file_is_skipped_and_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_fixture(&temp_dir, "empty.svg", b"");

        let processor = FileProcessor::new(FixedTransform(vec![b'y'; 10]), false);
        let result = processor.process(&path).await;

        assert!(matches!(result.outcome, Outcome::Skipped { .. }));
        assert_eq!(result.reduction_percent(), 0.0);
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_growing_transform_reports_negative_savings() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_fixture(&temp_dir, "grow.svg", &[b'x'; 50]);

        let processor = FileProcessor::new(FixedTransform(vec![b'y'; 75]), false);
        let result = processor.process(&path).await;

        assert!(result.is_optimized());
        assert_eq!(result.saved_bytes(), -25);
        assert!((result.reduction_percent() + 50.0).abs() < f64::EPSILON);
        assert_eq!(fs::metadata(&path).unwrap().len(), 75);
    }

    #[tokio::test]
    async fn test_dry_run_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let original = vec![b'x'; 100];
        let path = write_fixture(&temp_dir, "dry.svg", &original);

        let processor = FileProcessor::new(FixedTransform(vec![b'y'; 60]), true);
        let result = processor.process(&path).await;

        assert!(result.is_optimized());
        assert_eq!(result.optimized_size, 60);
        assert_eq!(fs::read(&path).unwrap(), original);
    }
}
