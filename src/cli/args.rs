//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, init::InitArgs, insp::InspCommands, report::ReportCommands,
};

#[derive(Parser)]
#[command(name = "qit")]
#[command(author, version, about = "Quality Inspection Toolkit")]
#[command(
    long_about = "A Unix-style toolkit for managing inspection records as plain text files and deriving quality analytics reports from them."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .qit/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new QIT project
    Init(InitArgs),

    /// Browse inspection records (read-only)
    #[command(subcommand)]
    Insp(InspCommands),

    /// Generate quality reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for commands that render data
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pick a sensible format for the command
    Auto,
    /// Markdown tables
    Md,
    /// Pretty-printed JSON
    Json,
}
