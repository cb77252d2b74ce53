//! Error types for the legal toolkit pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving input or exporting documents.
#[derive(Error, Debug)]
pub enum Error {
    /// A text upload was not valid UTF-8.
    #[error("Text decoding error: {0}")]
    DecodeError(String),

    /// Failed to load or read a PDF file.
    #[error("PDF parsing error: {0}")]
    PdfParseError(String),

    /// ZIP archive error (for DOCX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing or writing error (for DOCX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// The print markup template was malformed.
    #[error("Markup error: {0}")]
    MarkupError(String),

    /// Failed to build or serialize a PDF document.
    #[error("PDF rendering error: {0}")]
    PdfRenderError(String),

    /// A request was missing required fields.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
