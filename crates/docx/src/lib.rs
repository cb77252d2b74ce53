//! DOCX (Office Open XML) reader and writer.
//!
//! DOCX files are ZIP archives of XML parts. The reader pulls paragraph text
//! out of the main document part; the writer builds a minimal package with one
//! paragraph per line of text.

pub mod reader;
pub mod writer;
mod xml;

pub use reader::DocxReader;
pub use writer::{DocxStyle, DocxWriter, DOCX_MIME_TYPE};
