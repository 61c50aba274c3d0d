use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "dispatcher-cfg")]
#[command(author, version, about = "AEM Dispatcher configuration generator - render farm definitions to .any files")]
#[command(long_about = "Validates declarative dispatcher farm definitions and renders them into \
    the dispatcher's .any configuration grammar plus the Apache module directives.\n\n\
    Exit codes:\n  \
    0 - Success\n  \
    1 - Validation failed\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render all configuration files from a farm definition file
    Generate(GenerateArgs),

    /// Validate a farm definition file without writing anything
    Validate(ValidateArgs),

    /// Generate a starter dispatcher.toml
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Path to the farm definition file (default: ./dispatcher.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory the rendered files are written to
    #[arg(short, long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Print rendered files to stdout instead of writing them
    #[arg(long)]
    pub stdout: bool,

    /// Only render the named farm (can be specified multiple times)
    #[arg(long)]
    pub farm: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the farm definition file (default: ./dispatcher.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Target path (default: ./dispatcher.toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
