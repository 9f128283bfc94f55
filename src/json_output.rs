//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso programmatico
//! del batch (script, wrapper, pipeline CI).
//!
//! ## Responsabilità:
//! - Emette un oggetto JSON per riga su stdout per ogni evento del batch
//! - Fornisce un'interfaccia stabile con campo `type` come discriminante
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio del batch (root, numero di file, configurazione)
//! - `file_start`: Un task ha ottenuto il permesso e inizia la conversione
//! - `file_complete`: Fine conversione di un file (output o errore)
//! - `progress`: Contatori aggregati dopo ogni file
//! - `complete`: Fine del batch con il riepilogo
//! - `error`: Errore fatale (traversal, dipendenze, validazione)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::OptimizeError;
use crate::progress::BatchReport;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum JsonMessage {
    #[serde(rename = "start")]
    Start {
        input_dir: PathBuf,
        output_dir: PathBuf,
        total_files: usize,
        config: JsonConfig,
    },

    #[serde(rename = "file_start")]
    FileStart {
        path: PathBuf,
        index: usize,
        total: usize,
    },

    #[serde(rename = "file_complete")]
    FileComplete {
        path: PathBuf,
        output: Option<PathBuf>,
        error: Option<String>,
    },

    #[serde(rename = "progress")]
    Progress {
        current: usize,
        total: usize,
        percentage: f64,
        converted: usize,
        errors: usize,
    },

    #[serde(rename = "complete")]
    Complete {
        total_files: usize,
        converted: usize,
        errors: usize,
        duration_seconds: f64,
    },

    #[serde(rename = "error")]
    Error {
        message: String,
        details: Option<String>,
    },
}

/// Configurazione per output JSON
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JsonConfig {
    pub extensions: Vec<String>,
    pub concurrency: usize,
    pub width: f64,
    pub compression_level: u8,
    pub dry_run: bool,
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(input_dir: PathBuf, output_dir: PathBuf, total_files: usize, config: JsonConfig) -> Self {
        Self::Start {
            input_dir,
            output_dir,
            total_files,
            config,
        }
    }

    pub fn file_start(path: PathBuf, index: usize, total: usize) -> Self {
        Self::FileStart { path, index, total }
    }

    pub fn file_complete(path: PathBuf, result: Result<PathBuf, String>) -> Self {
        match result {
            Ok(output) => Self::FileComplete {
                path,
                output: Some(output),
                error: None,
            },
            Err(error) => Self::FileComplete {
                path,
                output: None,
                error: Some(error),
            },
        }
    }

    /// Crea un messaggio di progresso
    pub fn progress(current: usize, total: usize, converted: usize, errors: usize) -> Self {
        let percentage = if total > 0 {
            (current as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        Self::Progress {
            current,
            total,
            percentage,
            converted,
            errors,
        }
    }

    /// Crea il messaggio finale dal report del batch
    pub fn complete(report: &BatchReport) -> Self {
        Self::Complete {
            total_files: report.total,
            converted: report.converted.len(),
            errors: report.failures.len(),
            duration_seconds: report.duration_seconds,
        }
    }

    pub fn error(message: String, details: Option<String>) -> Self {
        Self::Error { message, details }
    }

    /// Errore di validazione della configurazione, prima di qualsiasi lavoro
    pub fn invalid_config(error: &OptimizeError) -> Self {
        Self::error("Invalid configuration".to_string(), Some(error.to_string()))
    }
}

impl From<&crate::Config> for JsonConfig {
    fn from(config: &crate::Config) -> Self {
        Self {
            extensions: config.extensions.clone(),
            concurrency: config.concurrency,
            width: config.width,
            compression_level: config.compression_level,
            dry_run: config.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    fn test_message_is_tagged() {
        let msg = JsonMessage::file_start(PathBuf::from("in/a.png"), 0, 3);
        let value: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "file_start");
        assert_eq!(value["path"], "in/a.png");
        assert_eq!(value["total"], 3);
    }

    #[test]
    fn test_file_complete_carries_error() {
        let msg = JsonMessage::file_complete(PathBuf::from("in/a.png"), Err("boom".to_string()));
        let value: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["type"], "file_complete");
        assert!(value["output"].is_null());
        assert_eq!(value["error"], "boom");
    }

    #[test]
    fn test_progress_percentage() {
        match JsonMessage::progress(1, 4, 1, 0) {
            JsonMessage::Progress { percentage, .. } => assert_eq!(percentage, 25.0),
            other => panic!("unexpected message {:?}", other),
        }
        match JsonMessage::progress(0, 0, 0, 0) {
            JsonMessage::Progress { percentage, .. } => assert_eq!(percentage, 0.0),
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_config_snapshot() {
        let config = Config::default();
        let json = JsonConfig::from(&config);
        assert_eq!(json.concurrency, 5);
        assert_eq!(json.extensions, vec![".png", ".jpeg", ".jpg"]);
    }

    #[test]
    fn test_invalid_config_event() {
        let config = Config {
            concurrency: 0,
            json_output: true,
            ..Default::default()
        };
        let error = config.validate().unwrap_err();
        let message = JsonMessage::invalid_config(&error);

        let json: serde_json::Value = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["message"], "Invalid configuration");
        assert!(json["details"].as_str().unwrap().contains("Concurrency must be greater than 0"));
    }
}
