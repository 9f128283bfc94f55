//! # Utility Functions Module
//!
//! Small helpers for building external command lines.

use std::ffi::OsString;
use std::path::Path;

/// Builds a `Vec<String>` argument list from mixed literals and values.
///
/// Every item only needs to implement `ToString`, which removes the
/// `.to_string()` noise when assembling engine arguments:
///
/// ```ignore
/// let level = 6;
/// let args = args!["-compression_level", level, "-vf", "scale=1500:-1"];
/// ```
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        vec![$(::std::string::ToString::to_string(&$item)),*]
    };
}

/// Paths are passed to the engine as `OsString` so non-UTF-8 names survive.
pub fn path_arg(path: &Path) -> OsString {
    path.as_os_str().to_os_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_macro_mixed_types() {
        let level = 6;
        let result: Vec<String> = args!["-compression_level", level, "-y"];
        assert_eq!(result, vec!["-compression_level", "6", "-y"]);
    }

    #[test]
    fn test_args_macro_owned_strings() {
        let width = 1500.0_f64;
        let result: Vec<String> = args!["-vf", format!("scale={}:-1", width)];
        assert_eq!(result, vec!["-vf", "scale=1500:-1"]);
    }

    #[test]
    fn test_args_macro_empty() {
        let result: Vec<String> = args![];
        assert!(result.is_empty());
    }

    #[test]
    fn test_path_arg_keeps_path() {
        assert_eq!(path_arg(Path::new("/in/a b.png")), OsString::from("/in/a b.png"));
    }
}
