//! PDF support for the legal toolkit.
//!
//! - [`extract`]: page-by-page text extraction from uploaded PDFs.
//! - [`markup`]: the heading-plus-paragraph print template.
//! - [`render`]: lays the template out on pages and writes PDF bytes.

pub mod extract;
pub mod markup;
pub mod render;

pub use extract::PdfExtractor;
pub use markup::{build_markup, parse_markup, Block};
pub use render::{PdfLayout, PdfRenderer, PDF_MIME_TYPE};
