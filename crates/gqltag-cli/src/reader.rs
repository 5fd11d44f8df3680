use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CliError;

pub const CONFIG_FILE: &str = "gqltag.config.yaml";

const DEFAULT_PATTERN: &str = "**/*.go";

/// A file with its path and content.
pub struct GoFile {
    pub path: String,
    pub content: String,
}

/// Project configuration from gqltag.config.yaml.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GqltagConfig {
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationConfig {
    pub check_type_references: Option<bool>,
}

/// Files selected by a path argument, with the config that selected them.
pub struct SourceSet {
    pub files: Vec<GoFile>,
    pub config: GqltagConfig,
}

/// Read Go sources from a path (file or directory). Fails when nothing
/// matches.
pub fn load_sources(input_path: &Path) -> Result<SourceSet, CliError> {
    if !input_path.exists() {
        return Err(CliError::MissingPath(input_path.to_path_buf()));
    }

    let set = if input_path.is_file() {
        SourceSet {
            files: vec![read_go_file(input_path)?],
            config: GqltagConfig::default(),
        }
    } else if input_path.is_dir() {
        let config = read_project_config(input_path)?.unwrap_or_default();
        let patterns = match &config.sources {
            Some(s) if !s.is_empty() => s.clone(),
            _ => vec![DEFAULT_PATTERN.to_string()],
        };
        SourceSet {
            files: read_matching(input_path, &patterns)?,
            config,
        }
    } else {
        return Err(CliError::UnsupportedPath(input_path.to_path_buf()));
    };

    if set.files.is_empty() {
        return Err(CliError::NoSources(input_path.to_path_buf()));
    }
    tracing::info!(files = set.files.len(), path = %input_path.display(), "loaded sources");
    Ok(set)
}

/// Read project config from gqltag.config.yaml if it exists.
pub fn read_project_config(dir_path: &Path) -> Result<Option<GqltagConfig>, CliError> {
    let config_path = dir_path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&config_path).map_err(|source| CliError::Read {
        path: config_path.clone(),
        source,
    })?;
    let config: GqltagConfig = serde_yaml::from_str(&content).map_err(|source| CliError::Config {
        path: config_path.clone(),
        source,
    })?;
    tracing::debug!(config = ?config, path = %config_path.display(), "read project config");
    Ok(Some(config))
}

/// Expand each pattern relative to `base_dir`; files keep the order of the
/// first pattern that matched them.
fn read_matching(base_dir: &Path, patterns: &[String]) -> Result<Vec<GoFile>, CliError> {
    let mut files = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for pattern in patterns {
        let full_pattern = base_dir.join(pattern);
        let pattern_str = full_pattern.to_string_lossy().replace('\\', "/");
        let entries = glob::glob(&pattern_str).map_err(|source| CliError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        let mut matched: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry?;
            if path.is_file() && seen.insert(path.clone()) {
                matched.push(path);
            }
        }
        matched.sort();
        tracing::debug!(pattern = %pattern, matched = matched.len(), "expanded source pattern");

        for path in matched {
            files.push(read_go_file(&path)?);
        }
    }

    Ok(files)
}

fn read_go_file(path: &Path) -> Result<GoFile, CliError> {
    let content = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(GoFile {
        path: path.to_string_lossy().to_string(),
        content,
    })
}
