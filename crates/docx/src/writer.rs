//! DOCX package writer.
//!
//! Produces a minimal Office Open XML package: one paragraph per input line,
//! all in the `Normal` style, whose font and size come from [`DocxStyle`].

use crate::xml::XmlBuilder;
use legal_core::{Error, Result};
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// MIME type of a DOCX download.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// A4 in twentieths of a point.
const PAGE_WIDTH_TWIPS: &str = "11906";
const PAGE_HEIGHT_TWIPS: &str = "16838";
/// One inch.
const PAGE_MARGIN_TWIPS: &str = "1440";

/// Largest font size Word will open.
const MAX_FONT_SIZE_PT: u32 = 1638;

/// Default paragraph style for generated documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxStyle {
    font_name: String,
    font_size_pt: u32,
}

impl Default for DocxStyle {
    fn default() -> Self {
        Self {
            font_name: "Arial".to_string(),
            font_size_pt: 12,
        }
    }
}

impl DocxStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_name(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// Set the font size in points, clamped to the 1..=1638 range Word accepts.
    pub fn with_font_size(mut self, points: u32) -> Self {
        self.font_size_pt = points.clamp(1, MAX_FONT_SIZE_PT);
        self
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    pub fn font_size_pt(&self) -> u32 {
        self.font_size_pt
    }

    /// Font size in OOXML half-points.
    fn half_points(&self) -> String {
        (self.font_size_pt * 2).to_string()
    }
}

/// Writer for DOCX files.
#[derive(Debug, Clone, Default)]
pub struct DocxWriter {
    style: DocxStyle,
}

impl DocxWriter {
    /// Create a writer using the default Arial 12 pt style.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: DocxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> &DocxStyle {
        &self.style
    }

    /// Encode `text` as a DOCX package titled `title`.
    ///
    /// Each `\n`-separated line becomes one paragraph, blank lines included.
    /// A trailing `\r` on a line is dropped. Output is byte-for-byte stable
    /// for identical input.
    pub fn write(&self, text: &str, title: &str) -> Result<Vec<u8>> {
        let document_xml = self.document_xml(text)?;
        let styles_xml = self.styles_xml()?;
        let core_xml = core_properties_xml(title)?;

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let parts: [(&str, &[u8]); 6] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.as_bytes()),
            ("_rels/.rels", PACKAGE_RELS_XML.as_bytes()),
            ("word/document.xml", &document_xml),
            ("word/styles.xml", &styles_xml),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.as_bytes()),
            ("docProps/core.xml", &core_xml),
        ];

        for (path, content) in parts {
            zip.start_file(path, options)
                .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", path, e)))?;
            zip.write_all(content)
                .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", path, e)))?;
        }

        let bytes = zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?
            .into_inner();

        log::debug!("Wrote DOCX '{}': {} bytes", title, bytes.len());
        Ok(bytes)
    }

    fn document_xml(&self, text: &str) -> Result<Vec<u8>> {
        let mut xml = XmlBuilder::new()?;
        xml.start("w:document", &[("xmlns:w", W_NS), ("xmlns:r", R_NS)])?;
        xml.start("w:body", &[])?;

        for line in text.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            check_xml_chars(line)?;
            write_paragraph(&mut xml, line)?;
        }

        xml.start("w:sectPr", &[])?;
        xml.empty("w:pgSz", &[("w:w", PAGE_WIDTH_TWIPS), ("w:h", PAGE_HEIGHT_TWIPS)])?;
        xml.empty(
            "w:pgMar",
            &[
                ("w:top", PAGE_MARGIN_TWIPS),
                ("w:right", PAGE_MARGIN_TWIPS),
                ("w:bottom", PAGE_MARGIN_TWIPS),
                ("w:left", PAGE_MARGIN_TWIPS),
                ("w:header", "708"),
                ("w:footer", "708"),
                ("w:gutter", "0"),
            ],
        )?;
        xml.end("w:sectPr")?;

        xml.end("w:body")?;
        xml.end("w:document")?;
        Ok(xml.finish())
    }

    fn styles_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlBuilder::new()?;
        xml.start("w:styles", &[("xmlns:w", W_NS)])?;

        xml.start("w:docDefaults", &[])?;
        xml.start("w:rPrDefault", &[])?;
        self.write_run_properties(&mut xml)?;
        xml.end("w:rPrDefault")?;
        xml.end("w:docDefaults")?;

        xml.start(
            "w:style",
            &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
        )?;
        xml.empty("w:name", &[("w:val", "Normal")])?;
        xml.empty("w:qFormat", &[])?;
        self.write_run_properties(&mut xml)?;
        xml.end("w:style")?;

        xml.end("w:styles")?;
        Ok(xml.finish())
    }

    fn write_run_properties(&self, xml: &mut XmlBuilder) -> Result<()> {
        let font = self.style.font_name.as_str();
        let size = self.style.half_points();

        xml.start("w:rPr", &[])?;
        xml.empty(
            "w:rFonts",
            &[("w:ascii", font), ("w:hAnsi", font), ("w:eastAsia", font), ("w:cs", font)],
        )?;
        xml.empty("w:sz", &[("w:val", size.as_str())])?;
        xml.empty("w:szCs", &[("w:val", size.as_str())])?;
        xml.end("w:rPr")
    }
}

/// One `Normal` paragraph; tabs become `w:tab`.
fn write_paragraph(xml: &mut XmlBuilder, line: &str) -> Result<()> {
    xml.start("w:p", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:pStyle", &[("w:val", "Normal")])?;
    xml.end("w:pPr")?;

    if !line.is_empty() {
        xml.start("w:r", &[])?;
        for (i, segment) in line.split('\t').enumerate() {
            if i > 0 {
                xml.empty("w:tab", &[])?;
            }
            if !segment.is_empty() {
                xml.text_element("w:t", &[("xml:space", "preserve")], segment)?;
            }
        }
        xml.end("w:r")?;
    }

    xml.end("w:p")
}

fn core_properties_xml(title: &str) -> Result<Vec<u8>> {
    check_xml_chars(title)?;

    let mut xml = XmlBuilder::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.text_element("dc:title", &[], title)?;
    xml.text_element("dc:creator", &[], "Legal Toolkit")?;
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

/// The XML 1.0 `Char` production; surrogates cannot occur in a `char`.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Reject characters XML 1.0 cannot carry instead of writing a broken part.
fn check_xml_chars(text: &str) -> Result<()> {
    match text.chars().find(|&c| !is_xml_char(c)) {
        Some(c) => Err(Error::XmlError(format!(
            "Text contains a character not allowed in XML: U+{:04X}",
            c as u32
        ))),
        None => Ok(()),
    }
}
