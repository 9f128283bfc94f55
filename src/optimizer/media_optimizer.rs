//! # Media Optimizer Main Orchestrator
//!
//! Orchestratore principale: discovery dei file, pre-flight del transcoder e
//! dispatch concorrente delle conversioni.
//!
//! ## Gestione concorrenza:
//! - Un task tokio per ogni file, creati tutti subito
//! - Ogni task acquisisce un permesso del semaforo (capacità = `concurrency`)
//!   prima di fare qualsiasi lavoro e lo tiene per tutta la conversione
//! - Il permesso viene rilasciato all'uscita del task, sia in caso di
//!   successo che di errore
//! - `dispatch()` ritorna solo dopo che tutti i task sono terminati
//!
//! ## Error handling:
//! - Errori per singoli file non bloccano l'operazione
//! - Il `BatchReport` elenca conversioni riuscite e fallite
//! - Errori di traversal e dipendenze mancanti sono fatali

use crate::{
    config::Config,
    error::OptimizeError,
    file_manager::FileManager,
    json_output::{JsonConfig, JsonMessage},
    optimizer::{progress_tracker::ProgressTracker, task_optimizer::TaskOptimizer},
    progress::BatchReport,
    transcoder::{FfmpegTranscoder, Transcoder},
};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

/// Orchestratore principale
pub struct MediaOptimizer {
    config: Arc<Config>,
    transcoder: Arc<dyn Transcoder>,
}

impl MediaOptimizer {
    /// Crea l'ottimizzatore con ffmpeg come engine
    pub fn new(config: Config) -> Result<Self> {
        let transcoder = Arc::new(FfmpegTranscoder::new(config.ffmpeg_path.as_deref()));
        Self::with_transcoder(config, transcoder)
    }

    /// Crea l'ottimizzatore con un engine arbitrario
    pub fn with_transcoder(config: Config, transcoder: Arc<dyn Transcoder>) -> Result<Self> {
        if let Err(e) = config.validate() {
            if config.json_output {
                JsonMessage::invalid_config(&e).emit();
            }
            return Err(e.into());
        }
        Ok(Self {
            config: Arc::new(config),
            transcoder,
        })
    }

    /// Esegue l'intera pipeline: discovery, pre-flight, dispatch
    pub async fn run(&self) -> Result<BatchReport> {
        let files = match self.discover() {
            Ok(files) => files,
            Err(e) => {
                if self.config.json_output {
                    JsonMessage::error("Error while traversing directory".to_string(), Some(e.to_string())).emit();
                }
                return Err(e.into());
            }
        };

        self.emit_start_message(&files);

        if !self.config.dry_run && !files.is_empty() {
            if let Err(e) = self.transcoder.check_available() {
                if self.config.json_output {
                    JsonMessage::error("Transcoder unavailable".to_string(), Some(e.to_string())).emit();
                }
                return Err(e.into());
            }
        }

        let report = self.dispatch(files).await?;
        self.print_final_stats(&report);

        Ok(report)
    }

    /// Trova i file da convertire secondo la configurazione
    pub fn discover(&self) -> Result<Vec<PathBuf>, OptimizeError> {
        let root = &self.config.input_path;
        let extensions = &self.config.extensions;

        if self.config.skip_unreadable {
            let scan = FileManager::collect_lenient(root, extensions)?;
            if !scan.errors.is_empty() {
                warn!("Skipped {} unreadable entries under {}", scan.errors.len(), root.display());
            }
            Ok(scan.files)
        } else {
            FileManager::collect(root, extensions)
        }
    }

    /// Converte `files` con al massimo `concurrency` conversioni simultanee.
    ///
    /// Ritorna dopo che ogni task ha terminato e rilasciato il permesso.
    pub async fn dispatch(&self, files: Vec<PathBuf>) -> Result<BatchReport> {
        let start_time = Instant::now();
        let mut report = BatchReport::new(files.len());

        if files.is_empty() {
            info!("No files found to process");
            return Ok(report);
        }

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let progress_tracker = ProgressTracker::new(files.len(), self.config.json_output);
        let task_optimizer = TaskOptimizer::new(Arc::clone(&self.config), Arc::clone(&self.transcoder));

        let mut tasks = Vec::with_capacity(files.len());
        for (index, file_path) in files.iter().cloned().enumerate() {
            debug!("Queued {}", file_path.display());
            let semaphore = Arc::clone(&semaphore);
            let task_optimizer = task_optimizer.clone();
            let progress_clone = progress_tracker.clone();

            let task = tokio::spawn(async move {
                // released when the task body returns, on every path
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| OptimizeError::Task(e.to_string()))?;

                progress_clone.file_started(index, &file_path);
                let result = task_optimizer.convert(file_path.clone()).await;
                progress_clone.handle_file_completion(&file_path, &result).await;
                result
            });

            tasks.push(task);
        }

        // Aspetta tutti i task e raccoglie risultati
        let results = futures::future::join_all(tasks).await;
        for (file_path, joined) in files.into_iter().zip(results) {
            match joined {
                Ok(Ok(output)) => report.add_converted(file_path, output),
                Ok(Err(e)) => report.add_failure(file_path, e.to_string()),
                Err(e) => {
                    error!("Conversion task for {} did not complete: {}", file_path.display(), e);
                    report.add_failure(file_path, OptimizeError::Task(e.to_string()).to_string());
                }
            }
        }

        report.duration_seconds = start_time.elapsed().as_secs_f64();
        progress_tracker.finish(&report.format_summary());

        Ok(report)
    }

    /// Invia messaggio di inizio
    fn emit_start_message(&self, files: &[PathBuf]) {
        if self.config.json_output {
            JsonMessage::start(
                self.config.input_path.clone(),
                self.config.output_path.clone(),
                files.len(),
                JsonConfig::from(self.config.as_ref()),
            )
            .emit();
        } else {
            info!("Starting WebP conversion in: {}", self.config.input_path.display());
            info!("Output directory: {}", self.config.output_path.display());
            info!(
                "Width: {}px | Compression level: {} | Concurrency: {}",
                self.config.width, self.config.compression_level, self.config.concurrency
            );
            if self.config.dry_run {
                info!("Dry run mode: no files will be written");
            }
            info!("Found {} files to process", files.len());
        }
    }

    /// Stampa statistiche finali
    fn print_final_stats(&self, report: &BatchReport) {
        if self.config.json_output {
            JsonMessage::complete(report).emit();
            return;
        }

        info!("=== Conversion Complete ===");
        info!("Files converted: {}", report.converted.len());
        info!("Errors: {}", report.failures.len());
        for failure in &report.failures {
            info!("  • {}: {}", failure.input.display(), failure.error);
        }
        info!("Elapsed: {:.1}s", report.duration_seconds);
    }
}
