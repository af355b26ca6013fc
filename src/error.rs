//! Error types for htmldocx library.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for htmldocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting HTML to DOCX.
#[derive(Error, Debug)]
pub enum Error {
    /// A color token is neither a known color name nor a hex/rgb() value.
    #[error("Unknown color: {0:?}")]
    UnknownColor(String),

    /// The markup cannot be turned into a document tree without coercion.
    #[error("Malformed markup at byte {offset}: {message}")]
    MalformedMarkup {
        /// Byte offset in the input where the problem was detected
        offset: usize,
        /// Description of the offending fragment
        message: String,
    },

    /// A table row is shorter than the table and padding is disabled.
    #[error("Table row {row} has {cells} cells, expected {columns}")]
    RaggedTable {
        /// Zero-based row index
        row: usize,
        /// Number of cells found in the row
        cells: usize,
        /// Column count of the table
        columns: usize,
    },

    /// An internal invariant was violated while emitting the document.
    #[error("Emit error: {0}")]
    Emit(String),

    /// The input contains no HTML after preparation.
    #[error("Empty input html text")]
    EmptyInput,

    /// A conversion option has an unusable value.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// XML serialization failed.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Writing the ZIP container failed.
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error when reading or writing data.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a [`Error::MalformedMarkup`] value.
    pub fn malformed(offset: usize, message: impl Into<String>) -> Self {
        Error::MalformedMarkup {
            offset,
            message: message.into(),
        }
    }

    /// Check whether this error stems from bad input markup.
    pub fn is_malformed_markup(&self) -> bool {
        matches!(self, Error::MalformedMarkup { .. })
    }
}

/// Pipeline stage in which a conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Input preparation and option validation
    Input,
    /// HTML tree parsing
    Parse,
    /// Document model building
    Build,
    /// XML emission and archive packaging
    Emit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Input => "input",
            Stage::Parse => "parse",
            Stage::Build => "build",
            Stage::Emit => "emit",
        };
        f.write_str(name)
    }
}

/// Error returned by the public conversion entry points.
///
/// Wraps the originating [`Error`] together with the [`Stage`] that raised it.
#[derive(Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct ConversionError {
    /// Stage that failed
    pub stage: Stage,
    /// Underlying cause
    #[source]
    pub source: Error,
}

impl ConversionError {
    /// Create a new conversion error.
    pub fn new(stage: Stage, source: Error) -> Self {
        Self { stage, source }
    }

    /// The underlying cause.
    pub fn cause(&self) -> &Error {
        &self.source
    }
}
