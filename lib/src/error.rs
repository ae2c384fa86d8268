use std::fmt;
use std::path::{Path, PathBuf};

/// Custom error type for the chromemark library
///
/// Every variant here is fatal for a conversion run. Conditions that only
/// deserve a note on stderr are modelled by [`Warning`] instead.
#[derive(Debug, thiserror::Error)]
pub enum ChromemarkError {
    /// I/O errors with the path that caused them
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors on the output stream or anything without a path
    #[error("I/O error: {0}")]
    Stream(#[from] std::io::Error),

    /// Bookmark file could not be decoded
    #[error("bookmarks file {}: {message}", .path.display())]
    Json { path: PathBuf, message: String },

    /// Configuration file could not be decoded
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Invalid input or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Bookmark tree nested beyond the renderer's depth cap
    #[error("bookmarks file {}: tree nested deeper than {limit} levels", .path.display())]
    TooDeep { path: PathBuf, limit: usize },
}

/// Result type alias using ChromemarkError
pub type Result<T> = std::result::Result<T, ChromemarkError>;

impl ChromemarkError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChromemarkError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: &Path, err: impl fmt::Display) -> Self {
        ChromemarkError::Json {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ChromemarkError {
    fn from(err: serde_yaml::Error) -> Self {
        ChromemarkError::Yaml(err.to_string())
    }
}

/// Non-fatal conditions noticed during a run
#[derive(Debug)]
pub enum Warning {
    /// A directory below the discovery root could not be listed
    UnreadableDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A bookmark file declared a format version other than 1
    UnknownVersion { path: PathBuf, version: i64 },
    /// The default config file exists but could not be loaded
    BrokenConfig { path: PathBuf, message: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnreadableDirectory { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            Warning::UnknownVersion { path, version } => write!(
                f,
                "bookmarks file {}: unknown version {}, expected 1",
                path.display(),
                version
            ),
            Warning::BrokenConfig { path, message } => write!(
                f,
                "failed to load config from {}: {}; using default configuration",
                path.display(),
                message
            ),
        }
    }
}

/// Receiver for warnings raised while discovering and rendering
pub trait WarningSink {
    fn warn(&mut self, warning: Warning);
}

/// Prints each warning as a `Warning: ...` line on stderr
pub struct StderrWarnings;

impl WarningSink for StderrWarnings {
    fn warn(&mut self, warning: Warning) {
        log::debug!("{:?}", warning);
        eprintln!("Warning: {}", warning);
    }
}

impl WarningSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_warning_names_file_and_version() {
        let w = Warning::UnknownVersion {
            path: PathBuf::from("/tmp/Default/Bookmarks"),
            version: 2,
        };
        assert_eq!(
            w.to_string(),
            "bookmarks file /tmp/Default/Bookmarks: unknown version 2, expected 1"
        );
    }

    #[test]
    fn test_io_error_includes_path() {
        let err = ChromemarkError::io(
            "/nowhere",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "/nowhere: gone");
    }

    #[test]
    fn test_vec_collects_warnings() {
        let mut sink: Vec<Warning> = Vec::new();
        sink.warn(Warning::UnknownVersion {
            path: PathBuf::from("Bookmarks"),
            version: 3,
        });
        assert_eq!(sink.len(), 1);
    }
}
