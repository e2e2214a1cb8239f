//! Error types for the print pipeline.
//!
//! Per-unit problems (a QR code that cannot be encoded, a logo that cannot be
//! decoded) are represented here so they can be logged, but the compositor
//! swallows them. Everything else aborts the current batch.

/// Result type alias for print pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while laying out and writing print documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Template id is not in the catalog (or belongs to the other unit kind)
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// Generation was requested for an empty unit list
    #[error("Nothing to print: the unit list is empty")]
    EmptySelection,

    /// QR symbol could not be produced for a payload
    #[error("QR code encoding error: {0}")]
    QrEncode(String),

    /// Brand logo could not be loaded or decoded
    #[error("Logo error: {0}")]
    Logo(String),

    /// Raster image could not be encoded or decoded
    #[error("Image error: {0}")]
    Image(String),

    /// Unrecoverable failure while assembling a document
    #[error("Generation failed: {0}")]
    Generation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed unit list input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<crate::writer::ImageError> for Error {
    fn from(err: crate::writer::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}
