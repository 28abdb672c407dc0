use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that abort a load. No table is produced when one of
/// these is returned; the caller should surface a blocking message.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be read at all.
    #[error("could not read {}: {}", .path.display(), .source)]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source was readable but not parsable as tabular data.
    #[error("could not parse {}: {}", .path.display(), .message)]
    Format { path: PathBuf, message: String },

    /// Not a recognized tabular format.
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    /// A year value that fails numeric parsing. Year drives the temporal
    /// grouping and has no safe default, so the whole load fails.
    #[error("row {row}: year value '{value}' is not numeric")]
    DataIntegrity { row: usize, value: String },
}

/// Non-fatal warning: expected columns missing from the source header.
/// The table is still produced from whatever columns exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMismatch {
    pub missing: Vec<String>,
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source columns did not match the expected schema; missing: {}",
            self.missing.join(", ")
        )
    }
}
