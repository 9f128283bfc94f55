//! # Space WebP Optimizer Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Gestione configurazione e validazione parametri
//! - `error`: Tipi di errore custom
//! - `file_manager`: Discovery ricorsiva dei file da convertire
//! - `transcoder`: Interfaccia verso l'engine esterno (ffmpeg)
//! - `optimizer`: Orchestratore del batch e worker per singolo file
//! - `progress`: Progress bar e report finale
//! - `json_output`: Eventi JSON per uso programmatico
//! - `platform`: Risoluzione cross-platform dei binari
//!
//! ## Utilizzo:
//! ```ignore
//! use space_webp_optimizer::{Config, MediaOptimizer};
//!
//! let config = Config {
//!     input_path: "photos".into(),
//!     ..Default::default()
//! };
//! let optimizer = MediaOptimizer::new(config)?;
//! let report = optimizer.run().await?;
//! ```

pub mod utils;

pub mod config;
pub mod error;
pub mod file_manager;
pub mod json_output;
pub mod optimizer;
pub mod platform;
pub mod progress;
pub mod transcoder;

pub use config::Config;
pub use error::OptimizeError;
pub use file_manager::FileManager;
pub use optimizer::MediaOptimizer;
pub use progress::BatchReport;
pub use transcoder::{FfmpegTranscoder, TranscodeOptions, Transcoder};
