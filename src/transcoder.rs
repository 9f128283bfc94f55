//! # Transcoder Module
//!
//! The seam between the batch pipeline and the external encoding engine.
//!
//! The pipeline never touches pixels: it hands an input path, an output path
//! and a [`TranscodeOptions`] to a [`Transcoder`] and waits for the call to
//! return. [`FfmpegTranscoder`] is the production engine; tests plug in
//! synthetic ones.
//!
//! Calls are synchronous and may block for seconds, so the dispatcher runs
//! them on tokio's blocking pool.

use crate::error::OptimizeError;
use crate::platform::PlatformCommands;
use crate::utils::path_arg;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Named transform options passed to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeOptions {
    /// WebP compression effort (0-6)
    pub compression_level: u8,
    /// ffmpeg filter expression, e.g. `scale=1500:-1`
    pub scale_filter: String,
}

impl TranscodeOptions {
    /// Scale to `width`, height auto-computed to keep the aspect ratio
    pub fn for_width(width: f64, compression_level: u8) -> Self {
        Self {
            compression_level,
            scale_filter: format!("scale={}:-1", width),
        }
    }
}

/// An external engine that writes one output file per call
pub trait Transcoder: Send + Sync {
    /// Encode `input` into `output`. Blocks until the engine exits.
    fn transcode(&self, input: &Path, output: &Path, options: &TranscodeOptions) -> Result<(), OptimizeError>;

    /// Pre-flight check run once before dispatch
    fn check_available(&self) -> Result<(), OptimizeError> {
        Ok(())
    }
}

/// Runs `ffmpeg` as a child process
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    program: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new(override_path: Option<&Path>) -> Self {
        let program = PlatformCommands::instance().resolve("ffmpeg", override_path);
        Self { program }
    }

    /// Arguments after the program name
    pub fn build_args(input: &Path, output: &Path, options: &TranscodeOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = crate::args!["-hide_banner", "-loglevel", "error", "-y", "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(path_arg(input));
        args.extend(
            crate::args![
                "-compression_level",
                options.compression_level,
                "-vf",
                options.scale_filter
            ]
            .into_iter()
            .map(OsString::from),
        );
        args.push(path_arg(output));
        args
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, input: &Path, output: &Path, options: &TranscodeOptions) -> Result<(), OptimizeError> {
        let args = Self::build_args(input, output, options);
        debug!("Running {} {:?}", self.program.display(), args);

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                OptimizeError::MissingDependency(format!("failed to execute {}: {}", self.program.display(), e))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(OptimizeError::FFmpeg(format!(
                "{} ({})",
                stderr.trim(),
                result.status
            )));
        }

        Ok(())
    }

    fn check_available(&self) -> Result<(), OptimizeError> {
        if PlatformCommands::instance().is_command_available(&self.program) {
            Ok(())
        } else {
            Err(OptimizeError::MissingDependency(format!(
                "{} is required for WebP conversion",
                self.program.display()
            )))
        }
    }
}
