//! Error types for scanning playbook files.

use thiserror::Error;

/// Why a file produced no report.
///
/// Display output is the one-line diagnostic written to stderr.
#[derive(Error, Debug)]
pub enum ScanError {
    /// File name does not carry an accepted extension
    #[error("{path}: does not end in one of {}; skipping", format_extensions(.extensions))]
    UnsupportedExtension { path: String, extensions: Vec<String> },

    /// YAML could not be parsed
    #[error("{path}: error parsing YAML, skipping")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Top-level document is not a list
    #[error("{path} is not a list of plays or tasks, skipping")]
    NotAList { path: String },

    /// Document nests deeper than the extractor allows
    #[error("{path}: nesting deeper than {limit} levels, skipping")]
    DepthExceeded { path: String, limit: usize },

    /// File could not be read
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Fatal errors stop the whole run; everything else skips one file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScanError::Io { .. })
    }

    pub fn path(&self) -> &str {
        match self {
            ScanError::UnsupportedExtension { path, .. }
            | ScanError::Parse { path, .. }
            | ScanError::NotAList { path }
            | ScanError::DepthExceeded { path, .. }
            | ScanError::Io { path, .. } => path,
        }
    }
}

/// Render extensions the way the diagnostic has always shown them: `('.yml', '.yaml')`.
fn format_extensions(extensions: &[String]) -> String {
    let quoted: Vec<String> = extensions.iter().map(|ext| format!("'{ext}'")).collect();
    match quoted.as_slice() {
        [single] => format!("({single},)"),
        _ => format!("({})", quoted.join(", ")),
    }
}
