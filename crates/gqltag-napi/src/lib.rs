//! gqltag Node.js native addon via napi-rs.
//!
//! Backs the editor extension's diagnostics. All functions take string
//! inputs and return JSON strings.

#[macro_use]
extern crate napi_derive;

use gqltag_core::{parse_to_json, symbols_to_json, validate_to_json};

/// Parse gql tags and @Gql directives of one Go source file.
///
/// @param content - Go source text
/// @returns JSON string with `{ success: boolean, data?: { tags, directives }, error?: string }`
#[napi]
pub fn parse(content: String) -> String {
    parse_to_json(&content)
}

/// Validate one Go source file and return its issues as JSON.
///
/// @param content - Go source text
/// @param options_json - JSON options `{ checkTypeReferences?: boolean }`
/// @returns JSON string with `{ success: boolean, data?: { issues, summary }, error?: string }`
#[napi]
pub fn validate(content: String, options_json: String) -> String {
    validate_to_json(&content, &options_json)
}

/// Declared types, inputs and enums of one Go source file.
#[napi]
pub fn symbols(content: String) -> String {
    symbols_to_json(&content)
}
