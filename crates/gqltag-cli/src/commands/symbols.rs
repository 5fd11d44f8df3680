use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use gqltag_core::{build_validation_context, ScopedSymbols, StructScopes, ValidationContext};

use crate::error::CliError;
use crate::reader::load_sources;

#[derive(Serialize)]
struct FileSymbols {
    file: String,
    #[serde(flatten)]
    context: ValidationContext,
    /// Struct name -> names declared by its directive comment.
    structs: IndexMap<String, ScopedSymbols>,
}

pub fn run_symbols(input_path: &Path) -> Result<String, CliError> {
    let sources = load_sources(input_path)?;

    let files: Vec<FileSymbols> = sources
        .files
        .into_iter()
        .map(|f| {
            let structs = StructScopes::from_text(&f.content)
                .declarations()
                .map(|(name, scope)| (name.to_string(), scope.clone()))
                .collect();
            FileSymbols {
                context: build_validation_context(&f.content, true),
                structs,
                file: f.path,
            }
        })
        .collect();

    Ok(serde_json::to_string_pretty(&serde_json::json!({ "files": files }))?)
}
