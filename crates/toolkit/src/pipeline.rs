//! The generate-then-export pipeline run once per request.

use crate::export::{ExportOptions, ExportRenderer, ExportedFile};
use legal_core::{ContentGenerator, GeneratedDocument, PresentationOptions, Result, ToolRequest};

/// Everything handed back to the UI for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub document: GeneratedDocument,
    pub pdf: ExportedFile,
    pub docx: ExportedFile,
    /// Echoed from the request for the UI; never read here.
    pub presentation: PresentationOptions,
}

/// Content generator plus export renderer.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    generator: ContentGenerator,
    renderer: ExportRenderer,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self {
            generator: ContentGenerator::new(),
            renderer: ExportRenderer::with_options(options),
        }
    }

    /// Generate the tool's text and render both downloads.
    ///
    /// Readiness is not checked here; see `ToolInput::ensure_ready`.
    pub fn run(&self, request: ToolRequest) -> Result<ToolOutput> {
        let ToolRequest {
            input,
            presentation,
        } = request;

        log::debug!("Running {}", input.tool());
        let document = self.generator.generate(&input);
        let (pdf, docx) = self.renderer.export(&document.text, &document.name)?;

        Ok(ToolOutput {
            document,
            pdf,
            docx,
            presentation,
        })
    }
}

/// Run `request` with default export options.
pub fn run(request: ToolRequest) -> Result<ToolOutput> {
    Pipeline::new().run(request)
}

/// Run `request` with explicit export options.
pub fn run_with(request: ToolRequest, options: &ExportOptions) -> Result<ToolOutput> {
    Pipeline::with_options(options.clone()).run(request)
}
