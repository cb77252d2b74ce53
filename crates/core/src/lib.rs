//! Core domain types, tool templates, and error handling for the legal
//! toolkit.

pub mod error;
pub mod generate;
pub mod tool;
pub mod types;

pub use error::{Error, Result};
pub use generate::{ContentGenerator, GeneratedDocument};
pub use tool::{PresentationOptions, Tool, ToolInput, ToolRequest};
pub use types::{DocumentFormat, DocumentPayload, PASTED_INPUT_NAME};
