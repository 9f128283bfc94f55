//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e il report finale del batch.
//!
//! ## Componenti principali:
//! - `ProgressManager`: Barra di progresso `indicatif` avanzata a ogni file concluso
//! - `BatchReport`: Esito aggregato del dispatch (conversioni riuscite e fallite)
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:00:42] [=========================>--------------] 31/48 (64%) [OK] IMG_0042.jpg
//! ```

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Manages progress reporting for a batch
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(total_files: u64) -> Self {
        let bar = ProgressBar::new(total_files);

        // template is a constant, parsing it cannot fail
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// A manager that never draws, used for JSON mode
    pub fn hidden(total_files: u64) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_files);
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

    #[cfg(test)]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

/// A file that was converted (or would have been, in dry-run mode)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConvertedFile {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// A file whose conversion failed
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FailedFile {
    pub input: PathBuf,
    pub error: String,
}

/// Aggregate result of one dispatch
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub converted: Vec<ConvertedFile>,
    pub failures: Vec<FailedFile>,
    pub duration_seconds: f64,
}

impl BatchReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn add_converted(&mut self, input: PathBuf, output: PathBuf) {
        self.converted.push(ConvertedFile { input, output });
    }

    pub fn add_failure(&mut self, input: PathBuf, error: String) {
        self.failures.push(FailedFile { input, error });
    }

    /// True when no file failed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Every task settled exactly once
    pub fn settled(&self) -> usize {
        self.converted.len() + self.failures.len()
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {} files | Converted: {} | Errors: {} | Time: {:.1}s",
            self.settled(),
            self.converted.len(),
            self.failures.len(),
            self.duration_seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_accounting() {
        let mut report = BatchReport::new(3);
        report.add_converted(PathBuf::from("in/a.png"), PathBuf::from("out/a_optimized.webp"));
        report.add_converted(PathBuf::from("in/b.png"), PathBuf::from("out/b_optimized.webp"));
        assert!(report.is_success());

        report.add_failure(PathBuf::from("in/c.png"), "engine failed".to_string());
        assert!(!report.is_success());
        assert_eq!(report.settled(), 3);
        assert!(report.format_summary().contains("Converted: 2 | Errors: 1"));
    }

    #[test]
    fn test_hidden_progress_counts() {
        let progress = ProgressManager::hidden(2);
        progress.update("[OK] a.png");
        progress.update("[ERROR] b.png");
        assert_eq!(progress.position(), 2);
        progress.finish("done");
    }
}
