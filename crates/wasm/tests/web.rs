//! Browser tests, run with `wasm-pack test --headless --firefox crates/wasm`.

#![cfg(target_arch = "wasm32")]

use legal_toolkit_wasm::{extract_text, run_tool, tools};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(value: &JsValue, key: &str) -> JsValue {
    js_sys::Reflect::get(value, &key.into()).unwrap()
}

#[wasm_bindgen_test]
fn lists_five_tools() {
    let names = js_sys::Array::from(&tools().unwrap());
    assert_eq!(names.length(), 5);
    assert_eq!(names.get(0).as_string().unwrap(), "Legal Research Assistant");
}

#[wasm_bindgen_test]
fn runs_research_request() {
    let request = js_sys::Object::new();
    js_sys::Reflect::set(&request, &"tool".into(), &"research".into()).unwrap();
    js_sys::Reflect::set(&request, &"topic".into(), &"estoppel".into()).unwrap();

    let result = run_tool(request.into(), None, None).unwrap();
    assert_eq!(
        get(&result, "text").as_string().unwrap(),
        "Research summary for estoppel"
    );

    let docx = get(&result, "docx");
    assert_eq!(
        get(&docx, "fileName").as_string().unwrap(),
        "research_summary.docx"
    );
    assert!(js_sys::Uint8Array::new(&get(&docx, "bytes")).length() > 0);
}

#[wasm_bindgen_test]
fn extracts_pasted_text_file() {
    assert_eq!(extract_text(b"a\nb", "notes.txt").unwrap(), "a\nb");
    assert_eq!(extract_text(b"{\\rtf1}", "notes.rtf").unwrap(), "");
}
