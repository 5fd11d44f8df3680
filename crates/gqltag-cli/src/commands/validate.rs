use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use gqltag_core::ffi::IssueSummary;
use gqltag_core::{validate_document, CheckOptions, IssueSeverity, ValidationIssue};

use crate::error::CliError;
use crate::reader::load_sources;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Sarif,
}

/// Issue codes with their short description and default severity.
const RULES: [(&str, &str, IssueSeverity); 6] = [
    ("GQL-W001", "Unknown tag option", IssueSeverity::Warning),
    ("GQL-E001", "Conflicting optional and required flags", IssueSeverity::Error),
    ("GQL-E002", "Multiple access modifiers", IssueSeverity::Error),
    ("GQL-W002", "Reference to an undeclared type or input", IssueSeverity::Warning),
    ("GQL-W003", "Unknown directive", IssueSeverity::Warning),
    ("GQL-E003", "Namespace directive without a name", IssueSeverity::Error),
];

#[derive(Serialize)]
struct FileIssue<'a> {
    file: &'a str,
    #[serde(flatten)]
    issue: &'a ValidationIssue,
}

/// Validate every selected file. Returns the rendered report and the number
/// of error-severity issues.
pub fn run_validate(
    input_path: &Path,
    format: OutputFormat,
    no_type_references: bool,
) -> Result<(String, usize), CliError> {
    let sources = load_sources(input_path)?;
    let options = CheckOptions {
        check_type_references: !no_type_references
            && sources
                .config
                .validation
                .check_type_references
                .unwrap_or(true),
    };
    tracing::debug!(check_type_references = options.check_type_references, "validating");

    let results: Vec<(String, Vec<ValidationIssue>)> = sources
        .files
        .into_iter()
        .map(|f| {
            let issues = validate_document(&f.content, &options);
            (f.path, issues)
        })
        .collect();

    let all_issues: Vec<FileIssue<'_>> = results
        .iter()
        .flat_map(|(file, issues)| issues.iter().map(move |issue| FileIssue { file, issue }))
        .collect();
    let summary = IssueSummary::count(results.iter().flat_map(|(_, issues)| issues));
    let file_count = results.len();

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "issues": all_issues,
            "summary": {
                "errors": summary.errors,
                "warnings": summary.warnings,
                "infos": summary.infos,
                "files": file_count,
            }
        }))?,
        OutputFormat::Sarif => serde_json::to_string_pretty(&build_sarif(&all_issues))?,
        OutputFormat::Human => render_human(&all_issues, &summary, file_count),
    };

    Ok((output, summary.errors))
}

fn render_human(issues: &[FileIssue<'_>], summary: &IssueSummary, file_count: usize) -> String {
    let mut lines: Vec<String> = issues
        .iter()
        .map(|FileIssue { file, issue }| {
            format!(
                "{}:{}:{} {}[{}]: {}",
                file,
                issue.position.line + 1,
                issue.position.character + 1,
                issue.severity,
                issue.code,
                issue.message
            )
        })
        .collect();

    let error_word = if summary.errors == 1 { "error" } else { "errors" };
    let warning_word = if summary.warnings == 1 {
        "warning"
    } else {
        "warnings"
    };
    let file_word = if file_count == 1 { "file" } else { "files" };
    lines.push(format!(
        "{} {error_word}, {} {warning_word} in {file_count} {file_word}.",
        summary.errors, summary.warnings
    ));

    lines.join("\n")
}

fn sarif_level(severity: IssueSeverity) -> &'static str {
    match severity {
        IssueSeverity::Error => "error",
        IssueSeverity::Warning => "warning",
        IssueSeverity::Info => "note",
    }
}

fn build_sarif(issues: &[FileIssue<'_>]) -> serde_json::Value {
    let rule_descriptors: Vec<serde_json::Value> = RULES
        .iter()
        .map(|(id, description, severity)| {
            serde_json::json!({
                "id": id,
                "shortDescription": { "text": description },
                "defaultConfiguration": { "level": sarif_level(*severity) }
            })
        })
        .collect();

    let sarif_results: Vec<serde_json::Value> = issues
        .iter()
        .map(|FileIssue { file, issue }| {
            serde_json::json!({
                "ruleId": issue.code,
                "level": sarif_level(issue.severity),
                "message": { "text": issue.message },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": { "uri": file },
                        "region": {
                            "startLine": issue.position.line + 1,
                            "startColumn": issue.position.character + 1
                        }
                    }
                }]
            })
        })
        .collect();

    serde_json::json!({
        "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "gqltag",
                    "version": env!("CARGO_PKG_VERSION"),
                    "rules": rule_descriptors
                }
            },
            "results": sarif_results
        }]
    })
}
