pub mod parse;
pub mod run;
pub mod schema;
pub mod tools;

use clap::{Parser, Subcommand, ValueEnum};
use diagnorm::issue::Severity;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "diagnorm")]
#[command(
    author,
    version,
    about = "Normalize compiler, linter and API-checker diagnostics into uniform issue reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse tool output files and print the normalized issues
    Parse(ParseArgs),

    /// Parse every input of a config file and write reports
    Run(RunArgs),

    /// List the supported tools
    Tools,

    /// Print JSON Schema for config validation
    Schema,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
    Markdown,
}

#[derive(Parser, Clone)]
pub struct ParseArgs {
    /// Registry id of the tool that produced the files (see `diagnorm tools`)
    #[arg(short, long)]
    pub tool: String,

    /// Files to parse
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fill in content fingerprints
    #[arg(long)]
    pub fingerprint: bool,

    /// Upper bound for continuation lines of one record
    #[arg(long, env = "DIAGNORM_MAX_CONTINUATION_LINES")]
    pub max_continuation_lines: Option<usize>,
}

#[derive(Parser, Clone)]
pub struct RunArgs {
    /// Path to config file
    #[arg(short, long, default_value = "diagnorm.yaml")]
    pub config: PathBuf,

    /// Override max parallel inputs
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Override output directory
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Exit 1 if any issue has this severity or worse (CI mode)
    #[arg(long, value_parser = parse_severity)]
    pub fail_on: Option<Severity>,

    /// Show plan without parsing
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_severity(value: &str) -> Result<Severity, String> {
    value.parse()
}
