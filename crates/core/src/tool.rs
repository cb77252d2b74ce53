//! Tool identifiers and per-invocation requests.

use crate::error::Error;
use crate::types::DocumentPayload;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five fixed assistant tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    #[serde(rename = "Legal Research Assistant")]
    LegalResearch,
    #[serde(rename = "Case Brief Helper")]
    CaseBrief,
    #[serde(rename = "Legal Drafting Assistant")]
    LegalDrafting,
    #[serde(rename = "Contract Drafting Assistant")]
    ContractDrafting,
    #[serde(rename = "Contract Analyzer")]
    ContractAnalyzer,
}

impl Tool {
    /// All tools in selector order.
    pub const ALL: [Tool; 5] = [
        Tool::LegalResearch,
        Tool::CaseBrief,
        Tool::LegalDrafting,
        Tool::ContractDrafting,
        Tool::ContractAnalyzer,
    ];

    /// The identifier shown in the tool selector.
    pub fn display_name(self) -> &'static str {
        match self {
            Tool::LegalResearch => "Legal Research Assistant",
            Tool::CaseBrief => "Case Brief Helper",
            Tool::LegalDrafting => "Legal Drafting Assistant",
            Tool::ContractDrafting => "Contract Drafting Assistant",
            Tool::ContractAnalyzer => "Contract Analyzer",
        }
    }

    /// Short kebab-case alias, used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Tool::LegalResearch => "research",
            Tool::CaseBrief => "case-brief",
            Tool::LegalDrafting => "drafting",
            Tool::ContractDrafting => "contract-drafting",
            Tool::ContractAnalyzer => "contract-analyzer",
        }
    }

    /// Base name of the files this tool produces.
    pub fn result_name(self) -> &'static str {
        match self {
            Tool::LegalResearch => "research_summary",
            Tool::CaseBrief => "case_brief",
            Tool::LegalDrafting => "draft",
            Tool::ContractDrafting => "contract",
            Tool::ContractAnalyzer => "analysis",
        }
    }

    /// Whether this tool works on an uploaded or pasted document.
    pub fn takes_document(self) -> bool {
        matches!(self, Tool::CaseBrief | Tool::ContractAnalyzer)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Tool {
    type Err = Error;

    /// Accepts the exact display name or the slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|t| t.display_name() == s || t.slug() == s)
            .ok_or_else(|| Error::InvalidRequest(format!("Unknown tool: {}", s)))
    }
}

/// Fields supplied for one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInput {
    LegalResearch {
        topic: String,
    },
    CaseBrief {
        document: DocumentPayload,
    },
    LegalDrafting {
        scenario: String,
    },
    ContractDrafting {
        contract_type: String,
        party_a: String,
        party_b: String,
        clauses: String,
    },
    ContractAnalyzer {
        document: DocumentPayload,
    },
}

impl ToolInput {
    pub fn tool(&self) -> Tool {
        match self {
            ToolInput::LegalResearch { .. } => Tool::LegalResearch,
            ToolInput::CaseBrief { .. } => Tool::CaseBrief,
            ToolInput::LegalDrafting { .. } => Tool::LegalDrafting,
            ToolInput::ContractDrafting { .. } => Tool::ContractDrafting,
            ToolInput::ContractAnalyzer { .. } => Tool::ContractAnalyzer,
        }
    }

    /// Whether the required fields are filled in.
    ///
    /// Callers check this before running the pipeline; clauses are optional
    /// for contract drafting.
    pub fn is_ready(&self) -> bool {
        self.missing_field().is_none()
    }

    /// Name of the first required field that is empty, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            ToolInput::LegalResearch { topic } if topic.is_empty() => Some("topic"),
            ToolInput::LegalDrafting { scenario } if scenario.is_empty() => Some("scenario"),
            ToolInput::ContractDrafting { contract_type, .. } if contract_type.is_empty() => {
                Some("contract type")
            }
            ToolInput::ContractDrafting { party_a, .. } if party_a.is_empty() => Some("party A"),
            ToolInput::ContractDrafting { party_b, .. } if party_b.is_empty() => Some("party B"),
            ToolInput::CaseBrief { document } | ToolInput::ContractAnalyzer { document }
                if document.is_empty() =>
            {
                Some("document")
            }
            _ => None,
        }
    }

    /// Fail with [`Error::InvalidRequest`] unless the input is ready.
    pub fn ensure_ready(&self) -> crate::Result<()> {
        match self.missing_field() {
            Some(field) => Err(Error::InvalidRequest(format!(
                "{} requires a non-empty {}",
                self.tool(),
                field
            ))),
            None => Ok(()),
        }
    }
}

/// Cosmetic toggles owned by the hosting UI.
///
/// Carried through the pipeline untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationOptions {
    pub reduce_motion: bool,
    pub dark_mode: bool,
}

/// Everything one invocation needs, built once and moved into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequest {
    pub input: ToolInput,
    pub presentation: PresentationOptions,
}

impl ToolRequest {
    pub fn new(input: ToolInput) -> Self {
        Self {
            input,
            presentation: PresentationOptions::default(),
        }
    }

    pub fn with_presentation(mut self, presentation: PresentationOptions) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn tool(&self) -> Tool {
        self.input.tool()
    }
}
