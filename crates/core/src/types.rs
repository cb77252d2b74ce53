//! Domain types for representing resolved input documents.

use serde::{Deserialize, Serialize};

/// Name given to payloads built from pasted text.
pub const PASTED_INPUT_NAME: &str = "input";

/// Normalized text of one input, split into lines.
///
/// Built once per request from decoded file bytes or pasted text and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentPayload {
    /// Originating name (upload filename, or `"input"` for pasted text).
    name: String,

    /// Text lines in document order.
    lines: Vec<String>,
}

impl DocumentPayload {
    /// Create a payload from already-split lines.
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines,
        }
    }

    /// Create a payload by splitting `text` on `\n`.
    ///
    /// The empty string yields zero lines, so `from_text(n, t).text() == t`.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').map(str::to_string).collect()
        };
        Self::new(name, lines)
    }

    /// Create a payload from pasted text.
    pub fn pasted(text: &str) -> Self {
        Self::from_text(PASTED_INPUT_NAME, text)
    }

    /// An empty payload carrying only a name.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The normalized text: all lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// True when the joined text is the empty string.
    ///
    /// Blank or whitespace-only lines still count as content.
    pub fn is_empty(&self) -> bool {
        match self.lines.as_slice() {
            [] => true,
            [only] => only.is_empty(),
            _ => false,
        }
    }
}

/// The format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Portable Document Format.
    Pdf,
    /// Word document (Office Open XML).
    Docx,
    /// Plain UTF-8 text.
    Txt,
    /// Anything else. Resolves to empty text.
    Unsupported,
}

impl DocumentFormat {
    /// Detect format from a file extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "txt" => Self::Txt,
            _ => Self::Unsupported,
        }
    }

    /// Detect format from the extension of a filename.
    ///
    /// A name without any dot is treated as its own extension, matching how
    /// uploads named just `pdf` or `txt` are declared by some browsers.
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename.rsplit('.').next().unwrap_or(filename);
        Self::from_extension(ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_roundtrips() {
        for text in ["", "one", "a\nb", "a\n\nb", "trailing\n", "\n"] {
            assert_eq!(DocumentPayload::from_text("x", text).text(), text);
        }
    }

    #[test]
    fn test_from_text_line_count() {
        assert_eq!(DocumentPayload::from_text("x", "").lines().len(), 0);
        assert_eq!(DocumentPayload::from_text("x", "a").lines().len(), 1);
        assert_eq!(DocumentPayload::from_text("x", "a\n\nb").lines().len(), 3);
    }

    #[test]
    fn test_pasted_name() {
        let payload = DocumentPayload::pasted("hello");
        assert_eq!(payload.name(), "input");
        assert_eq!(payload.lines(), ["hello"]);
    }

    #[test]
    fn test_is_empty_only_for_empty_text() {
        assert!(DocumentPayload::from_text("x", "").is_empty());
        assert!(DocumentPayload::new("x", vec![String::new()]).is_empty());
        assert!(DocumentPayload::empty("x").is_empty());

        for text in ["  ", "\n", "\n\n", "\nclause\n"] {
            let payload = DocumentPayload::from_text("x", text);
            assert!(!payload.is_empty(), "{:?}", text);
            assert_eq!(payload.is_empty(), payload.text().is_empty());
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("pdf"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension(".DOCX"), DocumentFormat::Docx);
        assert_eq!(DocumentFormat::from_extension("Txt"), DocumentFormat::Txt);
        assert_eq!(
            DocumentFormat::from_extension("rtf"),
            DocumentFormat::Unsupported
        );
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(
            DocumentFormat::from_filename("Lease Agreement.final.PDF"),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_filename("memo.rtf"),
            DocumentFormat::Unsupported
        );
        assert_eq!(
            DocumentFormat::from_filename("README"),
            DocumentFormat::Unsupported
        );
    }
}
