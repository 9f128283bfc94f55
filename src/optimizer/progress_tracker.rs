//! # Progress Tracking Module
//!
//! Tracker thread-safe condiviso tra i task di conversione.
//! Gestisce sia output JSON che progress bar tradizionale.

use crate::{
    error::OptimizeError,
    json_output::JsonMessage,
    progress::ProgressManager,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Tracker progress unificato per il dispatch
#[derive(Clone)]
pub struct ProgressTracker {
    pub total_files: usize,
    json_output: bool,
    current_file: Arc<Mutex<usize>>,
    files_converted: Arc<Mutex<usize>>,
    errors: Arc<Mutex<usize>>,
    progress_manager: ProgressManager,
}

impl ProgressTracker {
    /// Crea un nuovo tracker
    pub fn new(total_files: usize, json_output: bool) -> Self {
        let progress_manager = if json_output {
            ProgressManager::hidden(total_files as u64)
        } else {
            ProgressManager::new(total_files as u64)
        };

        Self {
            total_files,
            json_output,
            current_file: Arc::new(Mutex::new(0)),
            files_converted: Arc::new(Mutex::new(0)),
            errors: Arc::new(Mutex::new(0)),
            progress_manager,
        }
    }

    /// Un task ha ottenuto il permesso e inizia a lavorare
    pub fn file_started(&self, index: usize, file_path: &Path) {
        if self.json_output {
            JsonMessage::file_start(file_path.to_path_buf(), index, self.total_files).emit();
        } else {
            info!("Optimizing file: {}", file_path.display());
        }
    }

    /// Registra l'esito di un file e aggiorna progress bar ed eventi JSON
    pub async fn handle_file_completion(&self, file_path: &Path, result: &Result<PathBuf, OptimizeError>) {
        let current = {
            let mut current = self.current_file.lock().await;
            *current += 1;
            *current
        };

        let name = file_path.file_name().unwrap_or_default().to_string_lossy();
        match result {
            Ok(output) => {
                *self.files_converted.lock().await += 1;
                if self.json_output {
                    JsonMessage::file_complete(file_path.to_path_buf(), Ok(output.clone())).emit();
                }
                self.progress_manager.update(&format!("[OK] {}", name));
            }
            Err(e) => {
                *self.errors.lock().await += 1;
                error!("Error while optimizing file {}: {}", file_path.display(), e);
                if self.json_output {
                    JsonMessage::file_complete(file_path.to_path_buf(), Err(e.to_string())).emit();
                }
                self.progress_manager.update(&format!("[ERROR] {}", name));
            }
        }

        if self.json_output {
            let converted = *self.files_converted.lock().await;
            let errors = *self.errors.lock().await;
            JsonMessage::progress(current, self.total_files, converted, errors).emit();
        }
    }

    /// Finalizza progress bar
    pub fn finish(&self, summary: &str) {
        self.progress_manager.finish(summary);
    }

    /// (settled, converted, errors)
    #[cfg(test)]
    pub async fn counts(&self) -> (usize, usize, usize) {
        let current = *self.current_file.lock().await;
        let converted = *self.files_converted.lock().await;
        let errors = *self.errors.lock().await;
        (current, converted, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completion_counts() {
        let tracker = ProgressTracker::new(3, true);
        tracker
            .handle_file_completion(Path::new("in/a.png"), &Ok(PathBuf::from("out/a_optimized.webp")))
            .await;
        tracker
            .handle_file_completion(
                Path::new("in/b.png"),
                &Err(OptimizeError::FFmpeg("bad input".to_string())),
            )
            .await;
        tracker
            .handle_file_completion(Path::new("in/c.png"), &Ok(PathBuf::from("out/c_optimized.webp")))
            .await;

        assert_eq!(tracker.counts().await, (3, 2, 1));
    }

    #[tokio::test]
    async fn test_clones_share_counters() {
        let tracker = ProgressTracker::new(2, true);
        let clone = tracker.clone();
        clone
            .handle_file_completion(Path::new("in/a.png"), &Ok(PathBuf::from("out/a_optimized.webp")))
            .await;
        assert_eq!(tracker.counts().await, (1, 1, 0));
    }
}
