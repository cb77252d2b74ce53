//! Export rendering: generated text to downloadable PDF and DOCX files.

use legal_core::Result;
use legal_docx::{DocxStyle, DocxWriter, DOCX_MIME_TYPE};
use legal_pdf::{PdfLayout, PdfRenderer, PDF_MIME_TYPE};

/// One downloadable rendition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// `<name>.pdf` or `<name>.docx`.
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Styling for both renditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptions {
    pub docx: DocxStyle,
    pub pdf: PdfLayout,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_docx_style(mut self, style: DocxStyle) -> Self {
        self.docx = style;
        self
    }

    pub fn with_pdf_layout(mut self, layout: PdfLayout) -> Self {
        self.pdf = layout;
        self
    }
}

/// Produces the PDF and DOCX renditions of a text.
#[derive(Debug, Clone, Default)]
pub struct ExportRenderer {
    docx: DocxWriter,
    pdf: PdfRenderer,
}

impl ExportRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self {
            docx: DocxWriter::new().with_style(options.docx),
            pdf: PdfRenderer::new().with_layout(options.pdf),
        }
    }

    /// Render `text` under a `name` heading as a PDF.
    pub fn to_pdf(&self, text: &str, name: &str) -> Result<ExportedFile> {
        Ok(ExportedFile {
            file_name: format!("{}.pdf", name),
            mime_type: PDF_MIME_TYPE,
            bytes: self.pdf.render_text(name, text)?,
        })
    }

    /// Render `text` as a DOCX, one paragraph per line.
    pub fn to_docx(&self, text: &str, name: &str) -> Result<ExportedFile> {
        Ok(ExportedFile {
            file_name: format!("{}.docx", name),
            mime_type: DOCX_MIME_TYPE,
            bytes: self.docx.write(text, name)?,
        })
    }

    /// Both renditions; fails if either one does.
    pub fn export(&self, text: &str, name: &str) -> Result<(ExportedFile, ExportedFile)> {
        let pdf = self.to_pdf(text, name)?;
        let docx = self.to_docx(text, name)?;
        Ok((pdf, docx))
    }
}
