use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, Mdf2IsoError>;

/// Errors that can occur while converting a disc image
#[derive(Debug, Error)]
pub enum Mdf2IsoError {
    /// I/O error occurred while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No known sync pattern matched the source
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// The source is already an ISO-9660 image
    #[error("Source is already an ISO-9660 image")]
    AlreadyIso,

    /// The source ended part way through a sector
    #[error("Truncated source at sector {sector}: expected {expected} bytes, got {actual}")]
    TruncatedSource {
        /// Sector index being read
        sector: u64,
        /// Bytes requested
        expected: u64,
        /// Bytes available
        actual: u64,
    },

    /// Invalid combination of options
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl Mdf2IsoError {
    /// Create an unknown format error
    pub fn unknown_format<S: Into<String>>(message: S) -> Self {
        Mdf2IsoError::UnknownFormat(message.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments<S: Into<String>>(message: S) -> Self {
        Mdf2IsoError::InvalidArguments(message.into())
    }

    /// Whether this error is the informational "already ISO" short-circuit
    pub fn is_already_iso(&self) -> bool {
        matches!(self, Mdf2IsoError::AlreadyIso)
    }
}
