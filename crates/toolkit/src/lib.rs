//! Input resolution, content generation, and export for the legal toolkit.
//!
//! ```text
//! Upload / pasted text --InputResolver--> DocumentPayload
//! ToolRequest --ContentGenerator--> GeneratedDocument
//! GeneratedDocument --ExportRenderer--> PDF + DOCX bytes
//! ```
//!
//! Every stage is a pure function of its input, so independent requests can
//! run on separate threads without coordination.

pub mod export;
pub mod pipeline;
pub mod resolve;

pub use export::{ExportOptions, ExportRenderer, ExportedFile};
pub use pipeline::{run, run_with, Pipeline, ToolOutput};
pub use resolve::{InputResolver, Upload};

pub use legal_core::{
    ContentGenerator, DocumentFormat, DocumentPayload, Error, GeneratedDocument,
    PresentationOptions, Result, Tool, ToolInput, ToolRequest,
};
pub use legal_docx::DocxStyle;
pub use legal_pdf::PdfLayout;
