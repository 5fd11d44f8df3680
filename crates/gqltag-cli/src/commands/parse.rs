use std::path::Path;

use serde::Serialize;

use gqltag_core::{parse_document, ParsedDocument, PARSER_VERSION};

use crate::error::CliError;
use crate::reader::load_sources;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParseOutput {
    parser_version: &'static str,
    files: Vec<FileDocument>,
}

#[derive(Serialize)]
struct FileDocument {
    file: String,
    #[serde(flatten)]
    document: ParsedDocument,
}

pub fn run_parse(input_path: &Path, output_file: Option<&Path>) -> Result<String, CliError> {
    let sources = load_sources(input_path)?;

    let files = sources
        .files
        .into_iter()
        .map(|f| FileDocument {
            document: parse_document(&f.content),
            file: f.path,
        })
        .collect();
    let json = serde_json::to_string_pretty(&ParseOutput {
        parser_version: PARSER_VERSION,
        files,
    })?;

    if let Some(out_path) = output_file {
        std::fs::write(out_path, &json).map_err(|source| CliError::Write {
            path: out_path.to_path_buf(),
            source,
        })?;
        return Ok(format!("Written to {}", out_path.display()));
    }

    Ok(json)
}
