//! Line-oriented file comparison.
//!
//! Provides three interchangeable line diff engines (Myers, patience,
//! histogram), a canonicalization pass over the resulting edit script,
//! hunk grouping with context padding, the five POSIX output formats
//! (normal, ed, forward ed, context, unified), and the file/directory
//! comparison driver.

pub mod algorithm;
pub mod canon;
pub mod driver;
pub mod format;
pub mod hunk;
pub mod lines;
pub mod script;
pub mod slider;

use std::io;
use std::path::PathBuf;

pub use algorithm::Algorithm;
pub use format::OutputFormat;
pub use script::Change;

/// Command name used in diagnostics and directory-walk header lines.
pub const PROGRAM: &str = "rudiff";

/// Options controlling a comparison run.
///
/// Threaded explicitly from the driver into each component; there is no
/// process-wide flag state.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Which diff engine to use.
    pub algorithm: Algorithm,
    /// Output format to produce.
    pub format: OutputFormat,
    /// Treat runs of blanks as a single space and ignore trailing blanks (-b).
    pub ignore_space_change: bool,
    /// Ignore ASCII case differences (-i).
    pub ignore_case: bool,
    /// Recurse into common subdirectories (-r).
    pub recursive: bool,
    /// Render file times in UTC instead of local time.
    pub utc: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Myers,
            format: OutputFormat::Normal,
            ignore_space_change: false,
            ignore_case: false,
            recursive: false,
            utc: false,
        }
    }
}

/// Error types for comparison operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("cannot compare '-' to a directory")]
    StdinDirectory,

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Output(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = DiffOptions::default();
        assert_eq!(opts.algorithm, Algorithm::Myers);
        assert_eq!(opts.format, OutputFormat::Normal);
        assert!(!opts.ignore_space_change);
        assert!(!opts.ignore_case);
        assert!(!opts.recursive);
        assert!(!opts.utc);
    }

    #[test]
    fn io_error_display_includes_path() {
        let err = DiffError::Io {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "missing.txt: no such file");
    }
}
