//! PDF text extraction.

use legal_core::{Error, Result};
use lopdf::Document;

/// Pulls page text out of PDF files.
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self
    }

    /// Text of each page, in page order.
    ///
    /// A page with no decodable text yields an empty string instead of
    /// failing the whole document.
    pub fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| Error::PdfParseError(format!("Failed to load PDF: {}", e)))?;

        let pages = doc.get_pages();
        log::debug!("PDF has {} pages", pages.len());

        let texts = pages
            .keys()
            .map(|&number| match doc.extract_text(&[number]) {
                Ok(text) => text.trim_end_matches(['\n', '\r']).to_string(),
                Err(e) => {
                    log::warn!("No extractable text on page {}: {}", number, e);
                    String::new()
                }
            })
            .collect();

        Ok(texts)
    }

    /// All page text joined with `\n`.
    pub fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        Ok(self.extract_pages(bytes)?.join("\n"))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}
