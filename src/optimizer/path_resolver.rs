//! # Path Resolution Module
//!
//! Centralizza il calcolo del path di output di ogni conversione.
//!
//! Il path viene calcolato per componenti, non per sostituzione di stringhe:
//! il prefisso di input viene rimosso con `strip_prefix`, il resto viene
//! riattaccato sotto la directory di output e solo l'estensione finale viene
//! sostituita con `_optimized.webp`.
//!
//! ```text
//! Input root:  /in
//! Output root: /out
//! File:        /in/a/b.png  ->  /out/a/b_optimized.webp
//! ```

use crate::error::OptimizeError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Appended to the file stem of every output
pub const OUTPUT_SUFFIX: &str = "_optimized.webp";

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Map `input_path` under `input_root` to its WebP path under `output_root`.
    ///
    /// When the input root is the file itself, the output lands directly in
    /// `output_root`.
    pub fn get_output_path(
        input_path: &Path,
        input_root: &Path,
        output_root: &Path,
    ) -> Result<PathBuf, OptimizeError> {
        let relative = if input_path == input_root {
            input_path.file_name().map(Path::new).ok_or_else(|| {
                OptimizeError::InvalidPath(format!("no file name in {}", input_path.display()))
            })?
        } else {
            input_path.strip_prefix(input_root).map_err(|_| {
                OptimizeError::InvalidPath(format!(
                    "{} is not under input root {}",
                    input_path.display(),
                    input_root.display()
                ))
            })?
        };

        let stem = relative.file_stem().ok_or_else(|| {
            OptimizeError::InvalidPath(format!("no file name in {}", input_path.display()))
        })?;

        let mut file_name = stem.to_os_string();
        file_name.push(OUTPUT_SUFFIX);

        let result = output_root.join(relative.with_file_name(file_name));
        debug!("Resolved output path: {} -> {}", input_path.display(), result.display());

        Ok(result)
    }

    /// Crea le directory parent se necessario
    pub async fn ensure_parent_dirs(path: &Path) -> Result<(), OptimizeError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_nested_file() {
        let out = PathResolver::get_output_path(
            Path::new("/in/a/b.png"),
            Path::new("/in"),
            Path::new("/out"),
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("/out/a/b_optimized.webp"));
    }

    #[test]
    fn test_root_name_repeated_in_path() {
        let out = PathResolver::get_output_path(
            Path::new("in/in/in.png"),
            Path::new("in"),
            Path::new("output"),
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("output/in/in_optimized.webp"));
    }

    #[test]
    fn test_only_final_extension_replaced() {
        let out = PathResolver::get_output_path(
            Path::new("/in/x.png/photo.final.png"),
            Path::new("/in"),
            Path::new("/out"),
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("/out/x.png/photo.final_optimized.webp"));
    }

    #[test]
    fn test_file_without_extension() {
        let out = PathResolver::get_output_path(
            Path::new("/in/somepng"),
            Path::new("/in"),
            Path::new("/out"),
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("/out/somepng_optimized.webp"));
    }

    #[test]
    fn test_single_file_root() {
        let out = PathResolver::get_output_path(
            Path::new("photos/cat.JPG"),
            Path::new("photos/cat.JPG"),
            Path::new("output"),
        )
        .unwrap();
        assert_eq!(out, PathBuf::from("output/cat_optimized.webp"));
    }

    #[test]
    fn test_file_outside_root_is_rejected() {
        let result = PathResolver::get_output_path(
            Path::new("/elsewhere/a.png"),
            Path::new("/in"),
            Path::new("/out"),
        );
        assert!(matches!(result, Err(OptimizeError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_ensure_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a/b/c_optimized.webp");
        PathResolver::ensure_parent_dirs(&target).await.unwrap();
        assert!(temp_dir.path().join("a/b").is_dir());

        // bare file name has no parent to create
        PathResolver::ensure_parent_dirs(Path::new("c_optimized.webp")).await.unwrap();
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_output_mirrors_input_tree(
            dirs in proptest::collection::vec("[a-z]{1,6}", 0..4),
            stem in "[a-zA-Z0-9_]{1,10}",
            ext in prop_oneof![Just("png"), Just("jpg"), Just("JPEG")],
        ) {
            let mut input = PathBuf::from("/in");
            let mut expected = PathBuf::from("/out");
            for dir in &dirs {
                input.push(dir);
                expected.push(dir);
            }
            input.push(format!("{}.{}", stem, ext));
            expected.push(format!("{}{}", stem, OUTPUT_SUFFIX));

            let out = PathResolver::get_output_path(&input, Path::new("/in"), Path::new("/out")).unwrap();
            prop_assert_eq!(out, expected);
        }
    }
}
