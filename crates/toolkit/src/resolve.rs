//! Input resolution: uploads and pasted text to a [`DocumentPayload`].

use legal_core::{DocumentFormat, DocumentPayload, Error, Result};
use legal_docx::DocxReader;
use legal_pdf::PdfExtractor;
use std::io::Cursor;

/// An uploaded file as the UI hands it over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Filename as uploaded; its extension selects the decoder.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn format(&self) -> DocumentFormat {
        DocumentFormat::from_filename(&self.name)
    }
}

/// Turns raw bytes of one format into normalized text.
type DecodeFn = fn(&str, &[u8]) -> Result<DocumentPayload>;

/// Decoder table; formats missing here resolve to empty text.
static DECODERS: [(DocumentFormat, DecodeFn); 3] = [
    (DocumentFormat::Pdf, decode_pdf),
    (DocumentFormat::Docx, decode_docx),
    (DocumentFormat::Txt, decode_txt),
];

fn decoder_for(format: DocumentFormat) -> Option<DecodeFn> {
    DECODERS
        .iter()
        .find(|(f, _)| *f == format)
        .map(|&(_, decode)| decode)
}

fn decode_pdf(name: &str, bytes: &[u8]) -> Result<DocumentPayload> {
    let text = PdfExtractor::new().extract_text(bytes)?;
    Ok(DocumentPayload::from_text(name, &text))
}

fn decode_docx(name: &str, bytes: &[u8]) -> Result<DocumentPayload> {
    let paragraphs = DocxReader::new().read_paragraphs(Cursor::new(bytes))?;
    Ok(DocumentPayload::from_text(name, &paragraphs.join("\n")))
}

fn decode_txt(name: &str, bytes: &[u8]) -> Result<DocumentPayload> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::DecodeError(format!("'{}' is not valid UTF-8: {}", name, e)))?;
    Ok(DocumentPayload::from_text(name, text))
}

/// Normalizes uploads and pasted text.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputResolver;

impl InputResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the form input: the upload if present, else the pasted text.
    pub fn resolve(&self, upload: Option<&Upload>, pasted: &str) -> Result<DocumentPayload> {
        match upload {
            Some(upload) => self.resolve_upload(upload),
            None => Ok(self.resolve_text(pasted)),
        }
    }

    pub fn resolve_upload(&self, upload: &Upload) -> Result<DocumentPayload> {
        self.resolve_bytes(&upload.name, upload.format(), &upload.bytes)
    }

    /// Decode `bytes` as `format`.
    ///
    /// Unsupported formats and unreadable containers resolve to an empty
    /// payload; only invalid UTF-8 in a text file is an error.
    pub fn resolve_bytes(
        &self,
        name: &str,
        format: DocumentFormat,
        bytes: &[u8],
    ) -> Result<DocumentPayload> {
        let Some(decode) = decoder_for(format) else {
            log::warn!("Unsupported upload '{}'; resolving to empty text", name);
            return Ok(DocumentPayload::empty(name));
        };

        match decode(name, bytes) {
            Ok(payload) => {
                log::debug!(
                    "Resolved '{}' as {:?}: {} lines",
                    name,
                    format,
                    payload.lines().len()
                );
                Ok(payload)
            }
            Err(e @ Error::DecodeError(_)) => Err(e),
            Err(e) => {
                log::warn!("Unreadable {:?} upload '{}': {}", format, name, e);
                Ok(DocumentPayload::empty(name))
            }
        }
    }

    /// Pasted text passes through unchanged.
    pub fn resolve_text(&self, text: &str) -> DocumentPayload {
        DocumentPayload::pasted(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_table_covers_supported_formats() {
        for format in [DocumentFormat::Pdf, DocumentFormat::Docx, DocumentFormat::Txt] {
            assert!(decoder_for(format).is_some());
        }
        assert!(decoder_for(DocumentFormat::Unsupported).is_none());
    }

    #[test]
    fn test_txt_verbatim() {
        let text = "\u{feff}Clause 1\r\n  Clause 2\n";
        let upload = Upload::new("terms.txt", text.as_bytes());
        let payload = InputResolver::new().resolve_upload(&upload).unwrap();
        assert_eq!(payload.text(), text);
        assert_eq!(payload.name(), "terms.txt");
    }

    #[test]
    fn test_txt_invalid_utf8_is_fatal() {
        let upload = Upload::new("latin1.txt", vec![b'c', b'a', b'f', 0xE9]);
        let result = InputResolver::new().resolve_upload(&upload);
        assert!(matches!(result, Err(Error::DecodeError(_))));
    }

    #[test]
    fn test_unsupported_extension_is_empty() {
        let upload = Upload::new("brief.rtf", b"{\\rtf1 hello}".to_vec());
        let payload = InputResolver::new().resolve_upload(&upload).unwrap();
        assert_eq!(payload.text(), "");
        assert_eq!(payload.name(), "brief.rtf");
    }

    #[test]
    fn test_unreadable_container_is_empty() {
        let resolver = InputResolver::new();
        for name in ["broken.pdf", "broken.docx"] {
            let payload = resolver
                .resolve_upload(&Upload::new(name, b"garbage".to_vec()))
                .unwrap();
            assert!(payload.lines().is_empty(), "{} should resolve empty", name);
        }
    }

    #[test]
    fn test_upload_wins_over_pasted_text() {
        let upload = Upload::new("notes.txt", b"from file".to_vec());
        let resolver = InputResolver::new();

        let payload = resolver.resolve(Some(&upload), "from paste").unwrap();
        assert_eq!(payload.text(), "from file");

        let payload = resolver.resolve(None, "from paste").unwrap();
        assert_eq!(payload.text(), "from paste");
        assert_eq!(payload.name(), "input");
    }
}
