use std::io;
use std::path::PathBuf;

/// Errors surfaced by the CLI. Issues found in sources are not errors; they
/// are reported through the command output and the exit code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Path does not exist: {}", .0.display())]
    MissingPath(PathBuf),

    #[error("Path is neither a file nor a directory: {}", .0.display())]
    UnsupportedPath(PathBuf),

    #[error("No Go source files found at: {}", .0.display())]
    NoSources(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Invalid YAML config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
