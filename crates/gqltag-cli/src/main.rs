mod commands;
mod error;
mod reader;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::validate::OutputFormat;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::WARN;

#[derive(Parser)]
#[command(
    name = "gqltag",
    version,
    about = "gql struct tag parser and validator for Go sources"
)]
struct Cli {
    /// Log at DEBUG level (overrides LOG_LEVEL)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse gql tags and @Gql directives and output JSON
    Parse {
        /// Input path (file or directory, defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate tags and directives and report issues
    Validate {
        /// Input path (file or directory, defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,

        /// Do not report list options naming undeclared types
        #[arg(long)]
        no_type_references: bool,
    },

    /// List declared types, inputs and enums
    Symbols {
        /// Input path (file or directory, defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_logger(&cli);

    let result = match cli.command {
        Commands::Parse { path, output } => {
            commands::parse::run_parse(&path, output.as_deref()).map(|out| (out, 0))
        }
        Commands::Validate {
            path,
            format,
            no_type_references,
        } => commands::validate::run_validate(&path, format, no_type_references),
        Commands::Symbols { path } => commands::symbols::run_symbols(&path).map(|out| (out, 0)),
    };

    match result {
        Ok((output, error_count)) => {
            println!("{output}");
            if error_count > 0 {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn setup_logger(cli: &Cli) {
    let mut log_level_warnings: Vec<String> = vec![];
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        let env_val = std::env::var("LOG_LEVEL").map(|s| s.trim().to_ascii_lowercase());

        match env_val.as_deref() {
            Ok("trace") => tracing::Level::TRACE,
            Ok("debug" | "verbose") => tracing::Level::DEBUG,
            Ok("info") => tracing::Level::INFO,
            Ok("warn" | "warning") => tracing::Level::WARN,
            Ok("error") => tracing::Level::ERROR,
            Ok(other) => {
                log_level_warnings.push(format!(
                    "Invalid `LOG_LEVEL` environment variable value: `{other}`"
                ));
                DEFAULT_LOG_LEVEL
            }
            Err(_) => DEFAULT_LOG_LEVEL,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    tracing::trace!("Initial logging level set to `{log_level}`.");

    for warning in log_level_warnings.drain(..) {
        tracing::warn!("{warning}");
    }
}
