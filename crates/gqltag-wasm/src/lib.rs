//! gqltag WASM bindings.
//!
//! Provides JavaScript-callable functions via wasm-bindgen.
//! All functions take string inputs and return JSON strings.

use gqltag_core::{parse_to_json, symbols_to_json, validate_to_json};
use wasm_bindgen::prelude::*;

/// Parse gql tags and @Gql directives of one Go source file.
///
/// @param content - Go source text
/// @returns JSON string with `{ success: boolean, data?: { tags, directives }, error?: string }`
#[wasm_bindgen(js_name = "parse")]
pub fn wasm_parse(content: &str) -> String {
    parse_to_json(content)
}

/// Validate one Go source file and return its issues as JSON.
///
/// @param content - Go source text
/// @param options_json - JSON options `{ checkTypeReferences?: boolean }`
/// @returns JSON string with `{ success: boolean, data?: { issues, summary }, error?: string }`
#[wasm_bindgen(js_name = "validate")]
pub fn wasm_validate(content: &str, options_json: &str) -> String {
    validate_to_json(content, options_json)
}

/// Declared types, inputs and enums of one Go source file.
///
/// @param content - Go source text
/// @returns JSON string with `{ success: boolean, data?: ValidationContext, error?: string }`
#[wasm_bindgen(js_name = "symbols")]
pub fn wasm_symbols(content: &str) -> String {
    symbols_to_json(content)
}
