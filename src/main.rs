//! # Space WebP Optimizer - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Creazione della configurazione e avvio dell'optimizer
//! - Traduzione dell'esito del batch in exit code
//!
//! ## Exit code:
//! - `0`: batch completato (anche con errori su singoli file)
//! - `1`: argomento mancante, configurazione invalida, traversal fallito, ffmpeg assente
//! - `2`: con `--strict`, almeno un file non è stato convertito
//!
//! ## Esempio di utilizzo:
//! ```bash
//! webp-optimizer ./photos --out ./web --width 1200 --concurrency 8
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use space_webp_optimizer::{config::DEFAULT_EXTENSIONS, Config, MediaOptimizer};

#[derive(Parser)]
#[command(name = "webp-optimizer")]
#[command(about = "Convert image trees to resized, compressed WebP")]
struct Args {
    /// Directory (or single file) containing images to optimize
    input: Option<PathBuf>,

    /// Image extensions of files to optimize (comma-separated, case-insensitive)
    #[arg(long = "exts", value_delimiter = ',', default_values_t = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect::<Vec<_>>())]
    extensions: Vec<String>,

    /// Number of files to optimize concurrently
    #[arg(short, long, default_value = "5")]
    concurrency: usize,

    /// Output directory for optimized files
    #[arg(short, long = "out", default_value = "output")]
    output: PathBuf,

    /// Desired width of the optimized image, height keeps the aspect ratio
    #[arg(short, long, default_value = "1500")]
    width: f64,

    /// WebP compression level (0-6, higher = smaller and slower)
    #[arg(long, default_value = "6")]
    compression_level: u8,

    /// Create missing output directories
    #[arg(long)]
    create_dirs: bool,

    /// Skip unreadable subdirectories instead of aborting
    #[arg(long)]
    skip_unreadable: bool,

    /// Dry run - print output paths without converting
    #[arg(long)]
    dry_run: bool,

    /// Exit with status 2 if any file failed to convert
    #[arg(long)]
    strict: bool,

    /// Output progress and status as JSON lines on stdout
    #[arg(long)]
    json: bool,

    /// Path to the ffmpeg binary
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let Some(input) = args.input.clone() else {
        println!("Please provide a directory to optimize images from");
        println!("{}", Args::command().render_usage());
        std::process::exit(1);
    };

    // Initialize logging; stderr keeps stdout clean for --json
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config {
        concurrency: args.concurrency,
        input_path: input,
        output_path: args.output,
        width: args.width,
        compression_level: args.compression_level,
        dry_run: args.dry_run,
        create_output_dirs: args.create_dirs,
        skip_unreadable: args.skip_unreadable,
        json_output: args.json,
        ffmpeg_path: args.ffmpeg,
        ..Default::default()
    }
    .with_extensions(&args.extensions);

    let optimizer = MediaOptimizer::new(config)?;
    let report = optimizer.run().await?;

    if args.strict && !report.is_success() {
        std::process::exit(2);
    }

    Ok(())
}
