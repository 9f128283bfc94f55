//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `OptimizeError` enum per categorizzare tutti gli errori possibili
//! - Fornisce messaggi di errore descrittivi e strutturati
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (root inesistente, permessi, etc.)
//! - `Traversal`: Errore durante la visita ricorsiva della directory
//! - `FFmpeg`: FFmpeg ha terminato con exit status non zero
//! - `InvalidPath`: Path di input non mappabile sulla directory di output
//! - `MissingDependency`: Tool esterno mancante (ffmpeg)
//! - `Validation`: Errori di validazione input
//! - `Task`: Task di conversione terminato in modo anomalo (panic)
//!
//! ## Esempio:
//! ```ignore
//! if config.concurrency == 0 {
//!     return Err(OptimizeError::Validation("concurrency must be at least 1".into()));
//! }
//! ```

use std::path::PathBuf;

/// Custom error types for media optimization
#[derive(thiserror::Error, Debug)]
pub enum OptimizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error while traversing {}: {source}", .path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("FFmpeg error: {0}")]
    FFmpeg(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Dependency missing: {0}")]
    MissingDependency(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conversion task failed: {0}")]
    Task(String),
}

impl OptimizeError {
    /// Wrap a walkdir error, keeping the offending path when walkdir knows it
    pub fn traversal(root: &std::path::Path, source: walkdir::Error) -> Self {
        let path = source
            .path()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| root.to_path_buf());
        Self::Traversal { path, source }
    }
}
