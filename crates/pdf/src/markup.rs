//! Print markup template.
//!
//! Text headed for PDF is first wrapped in a tiny XHTML document:
//!
//! ```text
//! <html><body><h1>{title}</h1><p>{line}<br/>{line}...</p></body></html>
//! ```
//!
//! and then parsed back into [`Block`]s for layout. Only `html`, `body`,
//! `h1`, `p` and `br` are understood; anything else is a markup error.

use legal_core::{Error, Result};
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

/// A laid-out unit of the print template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `<h1>` text.
    Heading(String),
    /// `<p>` content split at each `<br/>`.
    Paragraph(Vec<String>),
}

/// Wrap `text` in the print template, replacing every line break with `<br/>`.
pub fn build_markup(title: &str, text: &str) -> String {
    let body = text
        .split('\n')
        .map(|line| escape(line).into_owned())
        .collect::<Vec<_>>()
        .join("<br/>");

    format!(
        "<html><body><h1>{}</h1><p>{}</p></body></html>",
        escape(title),
        body
    )
}

/// Parse print markup into blocks.
pub fn parse_markup(markup: &str) -> Result<Vec<Block>> {
    let mut reader = Reader::from_str(markup);
    reader.trim_text(false);

    let mut blocks = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut heading = String::new();
    let mut lines: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                check_nesting(&open, &name)?;
                match name.as_str() {
                    "h1" => heading.clear(),
                    "p" => lines = vec![String::new()],
                    "br" => lines.push(String::new()),
                    _ => {}
                }
                open.push(name);
            }
            Ok(Event::Empty(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                check_nesting(&open, &name)?;
                match name.as_str() {
                    "h1" => blocks.push(Block::Heading(String::new())),
                    "p" => blocks.push(Block::Paragraph(Vec::new())),
                    "br" => lines.push(String::new()),
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::MarkupError(format!("Bad text: {}", e)))?;
                match open.last().map(String::as_str) {
                    Some("h1") => heading.push_str(&text),
                    Some("p") => {
                        if let Some(line) = lines.last_mut() {
                            line.push_str(&text);
                        }
                    }
                    _ if text.trim().is_empty() => {}
                    _ => {
                        return Err(Error::MarkupError(format!(
                            "Text outside of <h1> or <p>: {:?}",
                            text.trim()
                        )));
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if open.pop().as_deref() != Some(name.as_str()) {
                    return Err(Error::MarkupError(format!("Unexpected </{}>", name)));
                }
                match name.as_str() {
                    "h1" => blocks.push(Block::Heading(std::mem::take(&mut heading))),
                    "p" => blocks.push(Block::Paragraph(std::mem::take(&mut lines))),
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(Event::CData(_)) => {
                return Err(Error::MarkupError("CDATA sections are not supported".into()));
            }
            Err(e) => {
                return Err(Error::MarkupError(format!(
                    "Malformed markup at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            // Declarations, comments, processing instructions.
            _ => {}
        }
    }

    if let Some(name) = open.last() {
        return Err(Error::MarkupError(format!("Unclosed <{}>", name)));
    }

    Ok(blocks)
}

/// Check that `name` may appear inside the currently open elements.
fn check_nesting(open: &[String], name: &str) -> Result<()> {
    let parent = open.last().map(String::as_str);
    let allowed = match name {
        "html" => parent.is_none(),
        "body" => parent == Some("html"),
        "h1" | "p" => parent == Some("body"),
        "br" => parent == Some("p"),
        _ => {
            return Err(Error::MarkupError(format!("Unsupported element <{}>", name)));
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(Error::MarkupError(format!(
            "<{}> is not allowed inside {}",
            name,
            parent.map_or("the document root".to_string(), |p| format!("<{}>", p))
        )))
    }
}
