//! DOCX paragraph text extraction.

use crate::xml::local_name;
use legal_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Package-level relationships part.
const PACKAGE_RELS_PATH: &str = "_rels/.rels";

/// Where the main document part lives when the package does not say.
const DEFAULT_DOCUMENT_PATH: &str = "word/document.xml";

/// Reader for DOCX (Office Open XML) files.
pub struct DocxReader;

impl DocxReader {
    /// Create a new DOCX reader.
    pub fn new() -> Self {
        Self
    }

    /// Extract the text of every body paragraph, in document order.
    ///
    /// Paragraphs nested in tables or text boxes are skipped. Empty
    /// paragraphs yield empty strings.
    pub fn read_paragraphs<R: Read + Seek>(&self, reader: R) -> Result<Vec<String>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let document_path = self.main_document_path(&mut archive);
        log::debug!("Reading DOCX body from {}", document_path);

        let content = self.read_file_from_archive(&mut archive, &document_path)?;
        let paragraphs = extract_paragraphs(&content)?;

        log::debug!("Extracted {} paragraphs", paragraphs.len());
        Ok(paragraphs)
    }

    /// Locate the main document part through the package relationships.
    fn main_document_path<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> String {
        let rels_content = match self.read_file_from_archive(archive, PACKAGE_RELS_PATH) {
            Ok(content) => content,
            Err(e) => {
                log::debug!("{}; assuming {}", e, DEFAULT_DOCUMENT_PATH);
                return DEFAULT_DOCUMENT_PATH.to_string();
            }
        };

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    let mut rel_type = String::new();
                    let mut target = String::new();

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Type" => {
                                rel_type = String::from_utf8_lossy(&attr.value).to_string();
                            }
                            b"Target" => {
                                target = String::from_utf8_lossy(&attr.value).to_string();
                            }
                            _ => {}
                        }
                    }

                    if rel_type.ends_with("/officeDocument") && !target.is_empty() {
                        return target.trim_start_matches('/').to_string();
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    log::warn!("Error parsing package relationships: {}", e);
                    break;
                }
                _ => {}
            }
        }

        DEFAULT_DOCUMENT_PATH.to_string()
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for DocxReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk `word/document.xml` collecting top-level paragraph text.
///
/// Tabs become `\t`; `w:br` and `w:cr` become `\n`.
fn extract_paragraphs(xml_content: &str) -> Result<Vec<String>> {
    let mut paragraphs = Vec::new();
    let mut reader = Reader::from_str(xml_content);
    // Run text may carry significant leading or trailing spaces.
    reader.trim_text(false);

    let mut in_body = false;
    let mut table_depth = 0usize;
    let mut paragraph_depth = 0usize;
    let mut in_run = false;
    let mut in_text = false;
    let mut current_text = String::new();

    loop {
        let at_top = in_body && table_depth == 0 && paragraph_depth == 1;

        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"body" => in_body = true,
                b"tbl" => table_depth += 1,
                b"p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current_text.clear();
                    }
                }
                b"r" if at_top => in_run = true,
                b"t" if at_top && in_run => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"p" if in_body && table_depth == 0 && paragraph_depth == 0 => {
                    paragraphs.push(String::new());
                }
                b"tab" if at_top && in_run => current_text.push('\t'),
                b"br" | b"cr" if at_top && in_run => current_text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if at_top && in_text {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::XmlError(format!("Bad text in document body: {}", e)))?;
                    current_text.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if at_top && in_text {
                    current_text.push_str(&String::from_utf8_lossy(e));
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"body" => in_body = false,
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"p" => {
                    if paragraph_depth == 1 && in_body && table_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current_text));
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                b"r" if at_top => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing document body at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    fn body(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="{}"><w:body>{}</w:body></w:document>"#,
            W_NS, inner
        )
    }

    fn package(files: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in files {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_in_order() {
        let xml = body(
            r#"<w:p><w:r><w:t>First</w:t></w:r></w:p>
               <w:p><w:r><w:t xml:space="preserve">Second </w:t></w:r><w:r><w:t>half</w:t></w:r></w:p>
               <w:p/>
               <w:p><w:pPr><w:jc w:val="left"/></w:pPr></w:p>
               <w:p><w:r><w:t>Last</w:t></w:r></w:p>"#,
        );
        let paragraphs = extract_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, ["First", "Second half", "", "", "Last"]);
    }

    #[test]
    fn test_tabs_and_breaks_inside_runs_only() {
        let xml = body(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr>
               <w:r><w:t>Term</w:t><w:tab/><w:t>Definition</w:t><w:br/><w:t>More</w:t></w:r></w:p>"#,
        );
        let paragraphs = extract_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, ["Term\tDefinition\nMore"]);
    }

    #[test]
    fn test_skips_tables_and_text_boxes() {
        let xml = body(
            r#"<w:p><w:r><w:t>Before</w:t></w:r></w:p>
               <w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
               <w:p><w:r><w:t>Anchor</w:t><w:drawing><w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent></w:drawing></w:r></w:p>
               <w:p><w:r><w:t>After</w:t></w:r></w:p>"#,
        );
        let paragraphs = extract_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, ["Before", "Anchor", "After"]);
    }

    #[test]
    fn test_unescapes_entities() {
        let xml = body(r#"<w:p><w:r><w:t>Smith &amp; Sons &lt;Ltd&gt;</w:t></w:r></w:p>"#);
        assert_eq!(extract_paragraphs(&xml).unwrap(), ["Smith & Sons <Ltd>"]);
    }

    #[test]
    fn test_ignores_deleted_text() {
        let xml = body(
            r#"<w:p><w:del><w:r><w:delText>old</w:delText></w:r></w:del><w:r><w:t>new</w:t></w:r></w:p>"#,
        );
        assert_eq!(extract_paragraphs(&xml).unwrap(), ["new"]);
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        let xml = body("<w:p><w:r><w:t>open</w:r></w:p>");
        assert!(matches!(extract_paragraphs(&xml), Err(Error::XmlError(_))));
    }

    #[test]
    fn test_follows_package_relationships() {
        let rels = r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/custom/main.xml"/></Relationships>"#;
        let main = body("<w:p><w:r><w:t>Relocated</w:t></w:r></w:p>");
        let bytes = package(&[("_rels/.rels", rels), ("custom/main.xml", &main)]);

        let paragraphs = DocxReader::new().read_paragraphs(Cursor::new(bytes)).unwrap();
        assert_eq!(paragraphs, ["Relocated"]);
    }

    #[test]
    fn test_falls_back_to_default_document_path() {
        let main = body("<w:p><w:r><w:t>Plain</w:t></w:r></w:p>");
        let bytes = package(&[("word/document.xml", &main)]);

        let paragraphs = DocxReader::new().read_paragraphs(Cursor::new(bytes)).unwrap();
        assert_eq!(paragraphs, ["Plain"]);
    }

    #[test]
    fn test_not_a_zip() {
        let result = DocxReader::new().read_paragraphs(Cursor::new(b"not a zip".to_vec()));
        assert!(matches!(result, Err(Error::ZipError(_))));
    }
}
