//! # File Management Module
//!
//! Questo modulo gestisce la discovery dei file da convertire.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva dei file in una directory di input
//! - Filtro per suffisso sul path completo in minuscolo
//! - Bypass del filtro quando l'input è un singolo file
//!
//! ## Semantica del filtro:
//! Il confronto è un `ends_with` letterale sul path in minuscolo: il suffisso
//! `"png"` include sia `image.png` che `somepng`. Le directory non vengono
//! escluse esplicitamente. Ogni path compare al massimo una volta anche se
//! corrisponde a più suffissi.
//!
//! ## Gestione errori:
//! - `collect()`: tutto o niente, il primo errore di visita interrompe la discovery
//! - `collect_lenient()`: conserva i file trovati e registra gli errori per sottoalbero
//!
//! ## Esempio:
//! ```ignore
//! let files = FileManager::collect(Path::new("photos"), &config.extensions)?;
//! ```

use crate::error::OptimizeError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Result of a lenient traversal
#[derive(Debug, Default)]
pub struct CandidateScan {
    /// Matching paths, in walk order
    pub files: Vec<PathBuf>,
    /// Subtrees that could not be read, with the reason
    pub errors: Vec<(PathBuf, String)>,
}

/// Discovers candidate files
pub struct FileManager;

impl FileManager {
    /// Collect every entry under `root` whose lowercased path ends with one of
    /// `extensions`. A non-directory root is returned as-is.
    pub fn collect(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, OptimizeError> {
        let metadata = std::fs::metadata(root)?;
        if !metadata.is_dir() {
            debug!("Input is a single file: {}", root.display());
            return Ok(vec![root.to_path_buf()]);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| OptimizeError::traversal(root, e))?;
            if Self::matches_extension(entry.path(), extensions) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Same as [`FileManager::collect`], but unreadable entries are recorded
    /// and skipped. A missing root is still an error.
    pub fn collect_lenient(root: &Path, extensions: &[String]) -> Result<CandidateScan, OptimizeError> {
        let metadata = std::fs::metadata(root)?;
        if !metadata.is_dir() {
            return Ok(CandidateScan {
                files: vec![root.to_path_buf()],
                errors: Vec::new(),
            });
        }

        let mut scan = CandidateScan::default();
        for entry in WalkDir::new(root).sort_by_file_name() {
            match entry {
                Ok(entry) => {
                    if Self::matches_extension(entry.path(), extensions) {
                        scan.files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                    warn!("Skipping unreadable entry {}: {}", path.display(), e);
                    scan.errors.push((path, e.to_string()));
                }
            }
        }

        Ok(scan)
    }

    /// Literal, case-insensitive suffix test on the whole path
    pub fn matches_extension(path: &Path, extensions: &[String]) -> bool {
        let lowered = path.to_string_lossy().to_lowercase();
        extensions.iter().any(|ext| lowered.ends_with(ext.as_str()))
    }
}
