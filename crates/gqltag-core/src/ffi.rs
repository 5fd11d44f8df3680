//! FFI-oriented JSON API for cross-language bindings.
//!
//! All functions take string inputs and return JSON strings,
//! minimizing the FFI surface area.

use serde::{Deserialize, Serialize};

use crate::parser::parse_document;
use crate::symbols::build_validation_context;
use crate::types::*;
use crate::validator::validate_document;

// ---------------------------------------------------------------------------
// Options types (deserialized from JSON input)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateJsonOptions {
    #[serde(default = "default_true")]
    pub check_type_references: bool,
}

impl Default for ValidateJsonOptions {
    fn default() -> Self {
        Self {
            check_type_references: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Result types (serialized to JSON output)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FfiResult<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueSummary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl IssueSummary {
    pub fn count<'a>(issues: impl IntoIterator<Item = &'a ValidationIssue>) -> Self {
        issues.into_iter().fold(Self::default(), |mut acc, issue| {
            match issue.severity {
                IssueSeverity::Error => acc.errors += 1,
                IssueSeverity::Warning => acc.warnings += 1,
                IssueSeverity::Info => acc.infos += 1,
            }
            acc
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ValidateResult {
    pub issues: Vec<ValidationIssue>,
    pub summary: IssueSummary,
}

// ---------------------------------------------------------------------------
// Public FFI functions
// ---------------------------------------------------------------------------

/// Parse tags and directives of one document.
///
/// Output: `{ "success": true, "data": { "tags": [...], "directives": [...] } }`
pub fn parse_to_json(content: &str) -> String {
    run_guarded(|| parse_document(content))
}

/// Validate one document and return its issues with a severity summary.
///
/// Input: document text + options JSON (`{"checkTypeReferences": false}`).
/// An empty options string means defaults.
pub fn validate_to_json(content: &str, options_json: &str) -> String {
    let opts: ValidateJsonOptions = if options_json.trim().is_empty() {
        ValidateJsonOptions::default()
    } else {
        match serde_json::from_str(options_json) {
            Ok(o) => o,
            Err(e) => return failure(format!("Invalid options JSON: {e}")),
        }
    };

    run_guarded(|| {
        let issues = validate_document(
            content,
            &CheckOptions {
                check_type_references: opts.check_type_references,
            },
        );
        ValidateResult {
            summary: IssueSummary::count(&issues),
            issues,
        }
    })
}

/// Document-wide declared types, inputs and enums.
pub fn symbols_to_json(content: &str) -> String {
    run_guarded(|| build_validation_context(content, true))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn run_guarded<T, F>(f: F) -> String
where
    T: Serialize,
    F: FnOnce() -> T + std::panic::UnwindSafe,
{
    match std::panic::catch_unwind(f) {
        Ok(data) => {
            let ffi_result = FfiResult {
                success: true,
                data: Some(data),
                error: None,
            };
            serde_json::to_string(&ffi_result)
                .unwrap_or_else(|e| failure(format!("JSON serialization error: {e}")))
        }
        Err(_) => failure("Internal parser panic".to_string()),
    }
}

fn failure(message: String) -> String {
    serde_json::to_string(&FfiResult::<()> {
        success: false,
        data: None,
        error: Some(message),
    })
    .unwrap_or_else(|_| r#"{"success":false,"error":"unserializable error"}"#.to_string())
}
