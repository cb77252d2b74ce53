//! WASM bindings for the legal toolkit.
//!
//! Exposes the pipeline to the browser form: the page collects the tool
//! selection, fields and optional upload, calls [`run_tool`], and offers the
//! returned PDF and DOCX bytes as downloads.

use js_sys::{Object, Reflect, Uint8Array};
use legal_toolkit::{
    DocumentFormat, DocumentPayload, ExportedFile, InputResolver, PresentationOptions, Tool,
    ToolInput, ToolOutput, ToolRequest, Upload,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Form fields sent from JavaScript.
///
/// Only the fields the selected tool uses need to be present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormRequest {
    /// Tool display name or slug.
    pub tool: String,
    pub topic: String,
    pub scenario: String,
    pub contract_type: String,
    pub party_a: String,
    pub party_b: String,
    pub clauses: String,
    /// Pasted text for the document tools.
    pub text: String,
    pub reduce_motion: bool,
    pub dark_mode: bool,
}

/// Metadata half of the result; bytes are attached separately.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunSummary {
    tool: Tool,
    name: String,
    text: String,
    reduce_motion: bool,
    dark_mode: bool,
}

/// Display names for the tool selector, in order.
#[wasm_bindgen]
pub fn tools() -> Result<JsValue, JsValue> {
    let names: Vec<&str> = Tool::ALL.iter().map(|t| t.display_name()).collect();
    serde_wasm_bindgen::to_value(&names)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Run one tool.
///
/// # Arguments
/// * `request` - A [`FormRequest`]-shaped object
/// * `file_bytes` - Raw bytes of an uploaded document, if any
/// * `file_name` - The upload's filename (selects the decoder)
///
/// # Returns
/// `{tool, name, text, reduceMotion, darkMode, pdf, docx}` where `pdf` and
/// `docx` are `{fileName, mimeType, bytes: Uint8Array}`. Throws on error.
#[wasm_bindgen]
pub fn run_tool(
    request: JsValue,
    file_bytes: Option<Vec<u8>>,
    file_name: Option<String>,
) -> Result<JsValue, JsValue> {
    let form: FormRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from_str(&format!("Invalid request: {}", e)))?;

    let upload = file_bytes.map(|bytes| Upload::new(file_name.unwrap_or_default(), bytes));
    let output = run_tool_impl(&form, upload).map_err(|e| JsValue::from_str(&e))?;

    let summary = RunSummary {
        tool: output.document.tool,
        name: output.document.name.clone(),
        text: output.document.text.clone(),
        reduce_motion: output.presentation.reduce_motion,
        dark_mode: output.presentation.dark_mode,
    };
    let result = serde_wasm_bindgen::to_value(&summary)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))?;

    Reflect::set(&result, &"pdf".into(), &file_to_js(&output.pdf)?)?;
    Reflect::set(&result, &"docx".into(), &file_to_js(&output.docx)?)?;
    Ok(result)
}

/// Resolve an uploaded document to its normalized text.
#[wasm_bindgen]
pub fn extract_text(data: &[u8], filename: &str) -> Result<String, JsValue> {
    InputResolver::new()
        .resolve_bytes(filename, DocumentFormat::from_filename(filename), data)
        .map(|payload| payload.text())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn file_to_js(file: &ExportedFile) -> Result<JsValue, JsValue> {
    let obj = Object::new();
    Reflect::set(&obj, &"fileName".into(), &file.file_name.as_str().into())?;
    Reflect::set(&obj, &"mimeType".into(), &file.mime_type.into())?;
    Reflect::set(&obj, &"bytes".into(), &Uint8Array::from(file.bytes.as_slice()))?;
    Ok(obj.into())
}

fn run_tool_impl(form: &FormRequest, upload: Option<Upload>) -> Result<ToolOutput, String> {
    let request = build_request(form, upload.as_ref())?;
    log::debug!("Running {} from the browser form", request.tool());
    request.input.ensure_ready().map_err(|e| e.to_string())?;
    legal_toolkit::run(request).map_err(|e| e.to_string())
}

/// Turn form fields into a request; document tools resolve their input here.
fn build_request(form: &FormRequest, upload: Option<&Upload>) -> Result<ToolRequest, String> {
    let tool: Tool = form.tool.parse().map_err(|e: legal_toolkit::Error| e.to_string())?;

    let document = if tool.takes_document() {
        InputResolver::new()
            .resolve(upload, &form.text)
            .map_err(|e| e.to_string())?
    } else {
        DocumentPayload::default()
    };

    let input = match tool {
        Tool::LegalResearch => ToolInput::LegalResearch {
            topic: form.topic.clone(),
        },
        Tool::CaseBrief => ToolInput::CaseBrief { document },
        Tool::LegalDrafting => ToolInput::LegalDrafting {
            scenario: form.scenario.clone(),
        },
        Tool::ContractDrafting => ToolInput::ContractDrafting {
            contract_type: form.contract_type.clone(),
            party_a: form.party_a.clone(),
            party_b: form.party_b.clone(),
            clauses: form.clauses.clone(),
        },
        Tool::ContractAnalyzer => ToolInput::ContractAnalyzer { document },
    };

    Ok(ToolRequest::new(input).with_presentation(PresentationOptions {
        reduce_motion: form.reduce_motion,
        dark_mode: form.dark_mode,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(tool: &str) -> FormRequest {
        FormRequest {
            tool: tool.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_research_request() {
        let mut request = form("Legal Research Assistant");
        request.topic = "arbitration clauses".into();
        request.dark_mode = true;

        let output = run_tool_impl(&request, None).unwrap();
        assert_eq!(output.document.text, "Research summary for arbitration clauses");
        assert_eq!(output.pdf.file_name, "research_summary.pdf");
        assert!(output.presentation.dark_mode);
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let mut request = form("contract-drafting");
        request.contract_type = "NDA".into();
        request.party_a = "Acme".into();

        let err = run_tool_impl(&request, None).unwrap_err();
        assert!(err.contains("party B"), "{}", err);
    }

    #[test]
    fn test_upload_takes_precedence() {
        let mut request = form("Case Brief Helper");
        request.text = "pasted".into();
        let upload = Upload::new("judgment.txt", b"uploaded".to_vec());

        let built = build_request(&request, Some(&upload)).unwrap();
        match built.input {
            ToolInput::CaseBrief { document } => {
                assert_eq!(document.text(), "uploaded");
                assert_eq!(document.name(), "judgment.txt");
            }
            other => panic!("unexpected input: {:?}", other),
        }
    }

    #[test]
    fn test_upload_ignored_by_field_tools() {
        let mut request = form("drafting");
        request.scenario = "boundary dispute".into();
        let upload = Upload::new("notes.txt", vec![0xFF]);

        let built = build_request(&request, Some(&upload)).unwrap();
        assert_eq!(built.tool(), Tool::LegalDrafting);
    }

    #[test]
    fn test_unknown_tool() {
        assert!(build_request(&form("Legal Oracle"), None).is_err());
    }
}
