//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri della conversione
//! - Fornisce validazione dei parametri di input prima di qualsiasi lavoro
//! - Fornisce valori di default coerenti con la CLI
//!
//! ## Parametri di configurazione:
//! - `extensions`: Suffissi da includere (default: ".png", ".jpeg", ".jpg")
//! - `concurrency`: Conversioni simultanee massime (default: 5, minimo 1)
//! - `input_path`: Directory (o singolo file) di input
//! - `output_path`: Directory di output (default: "output")
//! - `width`: Larghezza target in pixel (default: 1500, altezza proporzionale)
//! - `compression_level`: Livello di compressione WebP 0-6 (default: 6)
//! - `dry_run`: Calcola i path senza invocare ffmpeg
//! - `create_output_dirs`: Crea le directory di output mancanti
//! - `skip_unreadable`: Continua la visita saltando i sottoalberi illeggibili
//!
//! ## Validazione:
//! - `concurrency` deve essere > 0 (altrimenti il semaforo non verrebbe mai acquisito)
//!   e non oltre `Semaphore::MAX_PERMITS`
//! - `width` deve essere finita e > 0
//! - `extensions` non può essere vuota
//! - `compression_level` deve essere 0-6
//!
//! ## Esempio:
//! ```ignore
//! let config = Config {
//!     concurrency: 8,
//!     width: 1200.0,
//!     ..Default::default()
//! }
//! .with_extensions([".PNG", ".webp"]);
//! config.validate()?;
//! ```

use crate::error::OptimizeError;
use tokio::sync::Semaphore;
use std::path::PathBuf;

/// Default suffixes matched against the lowercased path
pub const DEFAULT_EXTENSIONS: &[&str] = &[".png", ".jpeg", ".jpg"];

/// Highest compression effort accepted by libwebp
pub const MAX_COMPRESSION_LEVEL: u8 = 6;

/// Configuration for a conversion batch
#[derive(Debug, Clone)]
pub struct Config {
    /// Suffixes to match, stored lowercased
    pub extensions: Vec<String>,
    /// Maximum number of simultaneous transcodes
    pub concurrency: usize,
    /// Input root (directory or single file)
    pub input_path: PathBuf,
    /// Output root mirroring the input tree
    pub output_path: PathBuf,
    /// Target width in pixels, height follows the aspect ratio
    pub width: f64,
    /// WebP compression level (0-6)
    pub compression_level: u8,
    /// Derive output paths without running the engine
    pub dry_run: bool,
    /// Create missing output directories before each conversion
    pub create_output_dirs: bool,
    /// Collect what is readable instead of aborting on traversal errors
    pub skip_unreadable: bool,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
    /// Explicit path to the ffmpeg binary
    pub ffmpeg_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            concurrency: 5,
            input_path: PathBuf::from("."),
            output_path: PathBuf::from("output"),
            width: 1500.0,
            compression_level: MAX_COMPRESSION_LEVEL,
            dry_run: false,
            create_output_dirs: false,
            skip_unreadable: false,
            json_output: false,
            ffmpeg_path: None,
        }
    }
}

impl Config {
    /// Replace the extension list, normalizing to lowercase and dropping blanks
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), OptimizeError> {
        if self.concurrency == 0 {
            return Err(OptimizeError::Validation(
                "Concurrency must be greater than 0".to_string(),
            ));
        }

        if self.concurrency > Semaphore::MAX_PERMITS {
            return Err(OptimizeError::Validation(format!(
                "Concurrency must be at most {}, got {}",
                Semaphore::MAX_PERMITS,
                self.concurrency
            )));
        }

        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(OptimizeError::Validation(format!(
                "Width must be a positive number of pixels, got {}",
                self.width
            )));
        }

        if self.extensions.is_empty() {
            return Err(OptimizeError::Validation(
                "At least one extension must be configured".to_string(),
            ));
        }

        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(OptimizeError::Validation(format!(
                "Compression level must be between 0 and {}",
                MAX_COMPRESSION_LEVEL
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.extensions, vec![".png", ".jpeg", ".jpg"]);
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.output_path, PathBuf::from("output"));
        assert_eq!(config.width, 1500.0);
        assert_eq!(config.compression_level, 6);
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.concurrency = 0;
        assert!(matches!(config.validate(), Err(OptimizeError::Validation(_))));

        config.concurrency = usize::MAX;
        assert!(matches!(config.validate(), Err(OptimizeError::Validation(_))));

        config.concurrency = Semaphore::MAX_PERMITS;
        assert!(config.validate().is_ok());

        config.concurrency = 1;
        config.width = 0.0;
        assert!(config.validate().is_err());

        config.width = f64::NAN;
        assert!(config.validate().is_err());

        config.width = -10.0;
        assert!(config.validate().is_err());

        config.width = 800.0;
        config.compression_level = 7;
        assert!(config.validate().is_err());

        config.compression_level = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_extensions_are_normalized() {
        let config = Config::default().with_extensions([".PNG", " .Jpg ", ""]);
        assert_eq!(config.extensions, vec![".png", ".jpg"]);

        let empty = Config::default().with_extensions(Vec::<&str>::new());
        assert!(empty.validate().is_err());
    }
}
