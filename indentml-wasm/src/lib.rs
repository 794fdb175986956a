//! WASM bindings for `indentml`.
//!
//! Exposes the transpiler to JavaScript via wasm-bindgen. Call
//! `transpile()` with source text and an options object to get HTML, or
//! `diagnostics()` to lint source while the user is still typing.

use indentml::{Options, SelfClosingMode, SelfClosingTags};
use wasm_bindgen::prelude::*;

fn to_js(err: indentml::TranspileError) -> JsError {
    JsError::new(&err.to_string())
}

/// Transpile source text to HTML.
///
/// `options` is `{ formatOutput?, selfClosingMode?, indentUnit? }`; missing
/// fields (or `undefined`) fall back to the defaults.
#[wasm_bindgen]
pub fn transpile(input: &str, options: JsValue) -> Result<String, JsError> {
    let options: Options = if options.is_undefined() || options.is_null() {
        Options::default()
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))?
    };
    indentml::transpile(input, &options).map_err(to_js)
}

/// Transpile with positional options, for callers that hold a toggle and a
/// mode string rather than an object.
#[wasm_bindgen]
pub fn transpile_simple(input: &str, format_output: bool, self_closing_mode: &str) -> Result<String, JsError> {
    let options = Options {
        format_output,
        self_closing_mode: self_closing_mode.parse::<SelfClosingMode>().map_err(to_js)?,
        ..Default::default()
    };
    indentml::transpile(input, &options).map_err(to_js)
}

/// Return diagnostics for `input` as a JSON array of
/// `{ severity, message, line, code }` objects.
#[wasm_bindgen]
pub fn diagnostics(input: &str) -> String {
    match indentml::transpile_with_diagnostics(input, &Options::default()) {
        Ok(result) => serde_json::to_string(&result.diagnostics).unwrap_or_else(|_| "[]".to_string()),
        Err(e) => serde_json::json!([{ "severity": "error", "message": e.to_string() }]).to_string(),
    }
}

/// Parse a single tag line and return its `TagSpec` as JSON.
#[wasm_bindgen]
pub fn parse_line(line: &str) -> String {
    let parsed = indentml::parse_tag_line(line, SelfClosingTags::html());
    serde_json::to_string(&parsed.spec).unwrap_or_else(|_| "{}".to_string())
}
