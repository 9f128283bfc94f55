//! # Task Optimizer Module
//!
//! Worker per la conversione di un singolo file.
//! Separato dall'orchestratore per maggiore modularità: calcola il path di
//! output e invoca il transcoder sul blocking pool di tokio.

use crate::{
    config::Config,
    error::OptimizeError,
    optimizer::path_resolver::PathResolver,
    transcoder::{TranscodeOptions, Transcoder},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Worker per la conversione di singoli file
#[derive(Clone)]
pub struct TaskOptimizer {
    config: Arc<Config>,
    transcoder: Arc<dyn Transcoder>,
    options: TranscodeOptions,
}

impl TaskOptimizer {
    /// Crea nuovo task optimizer
    pub fn new(config: Arc<Config>, transcoder: Arc<dyn Transcoder>) -> Self {
        let options = TranscodeOptions::for_width(config.width, config.compression_level);
        Self {
            config,
            transcoder,
            options,
        }
    }

    /// Calcola path di output atteso (delegato a PathResolver)
    pub fn get_expected_output_path(&self, input_path: &Path) -> Result<PathBuf, OptimizeError> {
        PathResolver::get_output_path(input_path, &self.config.input_path, &self.config.output_path)
    }

    /// Converte un singolo file, ritorna il path scritto dal transcoder
    pub async fn convert(&self, file_path: PathBuf) -> Result<PathBuf, OptimizeError> {
        let output_path = self.get_expected_output_path(&file_path)?;

        if self.config.dry_run {
            info!("Dry run: would convert {} -> {}", file_path.display(), output_path.display());
            return Ok(output_path);
        }

        if self.config.create_output_dirs {
            PathResolver::ensure_parent_dirs(&output_path).await?;
        }

        debug!("Converting {} -> {}", file_path.display(), output_path.display());

        let transcoder = Arc::clone(&self.transcoder);
        let options = self.options.clone();
        let output = output_path.clone();
        tokio::task::spawn_blocking(move || transcoder.transcode(&file_path, &output, &options))
            .await
            .map_err(|e| OptimizeError::Task(e.to_string()))??;

        Ok(output_path)
    }
}
