//! Markup-to-PDF rendering.
//!
//! Blocks from the print template are laid out top to bottom on fixed-size
//! pages using the standard Helvetica fonts, then written with `lopdf`.

use crate::markup::{build_markup, parse_markup, Block};
use legal_core::{Error, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// MIME type of a PDF download.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Rough Helvetica advance width, in ems, used for line wrapping.
const AVERAGE_GLYPH_WIDTH_EM: f32 = 0.55;

/// Columns a tab expands to.
const TAB_WIDTH: usize = 4;

const BODY_FONT: &str = "F1";
const HEADING_FONT: &str = "F2";

/// Page geometry and type sizes, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayout {
    page_width: f32,
    page_height: f32,
    margin: f32,
    body_size: f32,
    heading_size: f32,
    line_spacing: f32,
}

impl Default for PdfLayout {
    /// A4 with one-inch margins, 12 pt body, 18 pt heading.
    fn default() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 72.0,
            body_size: 12.0,
            heading_size: 18.0,
            line_spacing: 1.4,
        }
    }
}

impl PdfLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    pub fn with_body_size(mut self, size: f32) -> Self {
        self.body_size = size;
        self
    }

    pub fn with_heading_size(mut self, size: f32) -> Self {
        self.heading_size = size;
        self
    }

    /// Line height as a multiple of the font size.
    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    fn validate(&self) -> Result<()> {
        let sizes = [self.body_size, self.heading_size, self.line_spacing];
        if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(Error::PdfRenderError(
                "Font sizes and line spacing must be positive".into(),
            ));
        }
        let tallest = self.heading_size.max(self.body_size) * self.line_spacing;
        if self.text_width() <= 0.0 || self.page_height - 2.0 * self.margin < tallest {
            return Err(Error::PdfRenderError(format!(
                "Margins of {}pt leave no room on a {}x{}pt page",
                self.margin, self.page_width, self.page_height
            )));
        }
        Ok(())
    }

    fn text_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Characters that fit on one line at `size`.
    fn columns(&self, size: f32) -> usize {
        ((self.text_width() / (size * AVERAGE_GLYPH_WIDTH_EM)) as usize).max(1)
    }
}

/// One line of text at a fixed position.
#[derive(Debug, Clone, PartialEq)]
struct PlacedLine {
    text: String,
    font: &'static str,
    size: f32,
    y: f32,
}

/// Renders print markup to PDF bytes.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    layout: PdfLayout,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: PdfLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Render `text` under a `title` heading.
    pub fn render_text(&self, title: &str, text: &str) -> Result<Vec<u8>> {
        self.render_markup(&build_markup(title, text))
    }

    /// Render a print markup document.
    ///
    /// The first heading also becomes the document title.
    pub fn render_markup(&self, markup: &str) -> Result<Vec<u8>> {
        self.layout.validate()?;

        let blocks = parse_markup(markup)?;
        let title = blocks
            .iter()
            .find_map(|b| match b {
                Block::Heading(text) => Some(text.as_str()),
                Block::Paragraph(_) => None,
            })
            .unwrap_or_default();

        let pages = self.paginate(&blocks);
        let bytes = self.write_document(title, &pages)?;

        log::debug!(
            "Rendered PDF '{}': {} pages, {} bytes",
            title,
            pages.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Assign every line a page and a baseline.
    fn paginate(&self, blocks: &[Block]) -> Vec<Vec<PlacedLine>> {
        let layout = &self.layout;
        let top = layout.page_height - layout.margin;
        let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
        let mut y = top;

        let mut place = |text: Option<String>, font: &'static str, size: f32| {
            let advance = size * layout.line_spacing;
            if y - advance < layout.margin {
                pages.push(Vec::new());
                y = top;
            }
            y -= advance;
            if let (Some(text), Some(page)) = (text, pages.last_mut()) {
                page.push(PlacedLine { text, font, size, y });
            }
        };

        for block in blocks {
            match block {
                Block::Heading(text) => {
                    let text = expand_tabs(text);
                    if text.trim().is_empty() {
                        continue;
                    }
                    for line in wrap_line(&text, layout.columns(layout.heading_size)) {
                        place(Some(line), HEADING_FONT, layout.heading_size);
                    }
                    // Gap below the heading.
                    place(None, BODY_FONT, layout.body_size * 0.5);
                }
                Block::Paragraph(lines) => {
                    for line in lines {
                        let line = expand_tabs(line.trim_end_matches('\r'));
                        if line.trim().is_empty() {
                            place(None, BODY_FONT, layout.body_size);
                            continue;
                        }
                        for wrapped in wrap_line(&line, layout.columns(layout.body_size)) {
                            place(Some(wrapped), BODY_FONT, layout.body_size);
                        }
                    }
                }
            }
        }

        pages
    }

    fn write_document(&self, title: &str, pages: &[Vec<PlacedLine>]) -> Result<Vec<u8>> {
        let layout = &self.layout;
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let body_font_id = doc.add_object(standard_font("Helvetica"));
        let heading_font_id = doc.add_object(standard_font("Helvetica-Bold"));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                BODY_FONT => body_font_id,
                HEADING_FONT => heading_font_id,
            },
        });

        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            layout.page_width.into(),
            layout.page_height.into(),
        ];

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for page in pages {
            let content_id = add_page_content(&mut doc, page, layout.margin)?;
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => media_box.clone(),
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => text_string(title),
            "Producer" => text_string("Legal Toolkit"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| Error::PdfRenderError(format!("Failed to serialize PDF: {}", e)))?;
        Ok(buffer)
    }
}

/// Add one page's content stream, one text object per line.
fn add_page_content(doc: &mut Document, lines: &[PlacedLine], left: f32) -> Result<ObjectId> {
    let mut operations = Vec::with_capacity(lines.len() * 5);
    for line in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![line.font.into(), line.size.into()]));
        operations.push(Operation::new("Td", vec![left.into(), line.y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations }
        .encode()
        .map_err(|e| Error::PdfRenderError(format!("Failed to encode page content: {}", e)))?;
    Ok(doc.add_object(Stream::new(dictionary! {}, content)))
}

fn standard_font(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// A PDF text string: literal when ASCII, UTF-16BE with BOM otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Encode for the standard fonts; unmappable characters become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            '‰' => 0x89,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Word-wrap `line` to at most `columns` characters per row.
///
/// Lines that already fit are returned untouched; words longer than a row
/// are split.
fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    if line.chars().count() <= columns {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();

        while chars.len() > columns {
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            rows.push(chars.drain(..columns).collect());
        }
        if chars.is_empty() {
            continue;
        }

        if current_len > 0 && current_len + 1 + chars.len() > columns {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += chars.len();
        current.extend(chars);
    }

    if current_len > 0 {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PdfExtractor;

    fn render(title: &str, text: &str) -> Vec<u8> {
        PdfRenderer::new().render_text(title, text).unwrap()
    }

    fn extracted_lines(bytes: &[u8]) -> Vec<String> {
        let text = PdfExtractor::new().extract_text(bytes).unwrap();
        text.lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.trim_end().to_string())
            .collect()
    }

    #[test]
    fn test_wrap_short_line_untouched() {
        assert_eq!(wrap_line("  keep  spacing", 40), ["  keep  spacing"]);
    }

    #[test]
    fn test_wrap_at_word_boundaries() {
        let rows = wrap_line("the quick brown fox jumps over the lazy dog", 15);
        assert_eq!(rows, ["the quick brown", "fox jumps over", "the lazy dog"]);
        assert!(rows.iter().all(|r| r.chars().count() <= 15));
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let rows = wrap_line("see abcdefghij end", 4);
        assert_eq!(rows, ["see", "abcd", "efgh", "ij", "end"]);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(
            encode_win_ansi("A§ “x” €"),
            vec![b'A', 0xA7, b' ', 0x93, b'x', 0x94, b' ', 0x80]
        );
        assert_eq!(encode_win_ansi("中"), b"?".to_vec());
    }

    #[test]
    fn test_output_is_a_pdf() {
        let bytes = render("research_summary", "Research summary for arbitration clauses");
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_heading_then_lines_in_order() {
        let bytes = render(
            "contract",
            "NDA between Acme and Beta\n\nClauses: Confidentiality for 5 years",
        );
        assert_eq!(
            extracted_lines(&bytes),
            [
                "contract",
                "NDA between Acme and Beta",
                "Clauses: Confidentiality for 5 years"
            ]
        );
    }

    #[test]
    fn test_special_characters_survive() {
        let bytes = render("memo", "Smith & Sons (Ltd) <see § 4>");
        assert_eq!(extracted_lines(&bytes)[1], "Smith & Sons (Ltd) <see § 4>");
    }

    #[test]
    fn test_long_text_spans_pages() {
        let text = (1..=120)
            .map(|i| format!("Clause {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let bytes = render("analysis", &text);

        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);

        let lines = extracted_lines(&bytes);
        assert_eq!(lines.len(), 121);
        assert_eq!(lines[1], "Clause 1");
        assert_eq!(lines[120], "Clause 120");
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let a = render("draft", "Draft for: easement dispute");
        let b = render("draft", "Draft for: easement dispute");
        assert_eq!(extracted_lines(&a), extracted_lines(&b));
    }

    #[test]
    fn test_malformed_markup_fails() {
        let result = PdfRenderer::new().render_markup("<html><body><p>unterminated");
        assert!(matches!(result, Err(Error::MarkupError(_))));
    }

    #[test]
    fn test_impossible_layout_fails() {
        let layout = PdfLayout::new().with_margin(400.0);
        let result = PdfRenderer::new()
            .with_layout(layout)
            .render_text("t", "x");
        assert!(matches!(result, Err(Error::PdfRenderError(_))));
    }
}
