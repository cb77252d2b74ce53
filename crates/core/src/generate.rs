//! Placeholder content generation.
//!
//! Each tool fills a fixed template with the fields it was given. No analysis
//! is done on the input; this is where a real drafting engine would plug in.

use crate::tool::{Tool, ToolInput};
use crate::types::DocumentPayload;
use serde::{Deserialize, Serialize};

/// Sections of the case brief skeleton.
const CASE_BRIEF_OUTLINE: &str =
    "Facts: ...\nIssues: ...\nArguments: ...\nJudgment: ...\nRatio: ...";

/// Heading line of the contract analysis skeleton.
const ANALYSIS_OUTLINE: &str = "Clause analysis...";

/// Text produced by one tool, ready for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocument {
    /// Tool that produced the text.
    pub tool: Tool,

    /// Base name for downloads (`<name>.pdf`, `<name>.docx`).
    pub name: String,

    /// Generated plain text; lines separated by `\n`.
    pub text: String,
}

/// Fills per-tool templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentGenerator;

impl ContentGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate the placeholder result for `input`.
    ///
    /// Never fails, including on empty fields.
    pub fn generate(&self, input: &ToolInput) -> GeneratedDocument {
        let tool = input.tool();
        let text = match input {
            ToolInput::LegalResearch { topic } => format!("Research summary for {}", topic),
            ToolInput::CaseBrief { document } => with_source(CASE_BRIEF_OUTLINE, document),
            ToolInput::LegalDrafting { scenario } => format!("Draft for: {}", scenario),
            ToolInput::ContractDrafting {
                contract_type,
                party_a,
                party_b,
                clauses,
            } => format!(
                "{} between {} and {}\nClauses: {}",
                contract_type, party_a, party_b, clauses
            ),
            ToolInput::ContractAnalyzer { document } => with_source(ANALYSIS_OUTLINE, document),
        };

        log::debug!("{} generated {} bytes of text", tool, text.len());

        GeneratedDocument {
            tool,
            name: tool.result_name().to_string(),
            text,
        }
    }
}

/// Append the source document under an outline.
fn with_source(outline: &str, document: &DocumentPayload) -> String {
    format!(
        "{}\n\nSource: {}\n{}",
        outline,
        document.name(),
        document.text()
    )
}
