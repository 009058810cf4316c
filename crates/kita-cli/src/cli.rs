//! CLI argument definitions for the childcare import.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "kita-import",
    version,
    about = "Import child lists into the childcare administration",
    long_about = "Import child lists (CSV, TSV, TXT) into the childcare administration.\n\n\
                  Columns are matched to fields automatically, rows are previewed\n\
                  against the stored children and committed after review."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow names and member numbers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the import fields and their column keywords.
    Fields,

    /// Parse a file locally and show the detected column mapping.
    Inspect(InspectArgs),

    /// Upload, preview and commit a file against the server.
    Run(RunArgs),

    /// Show or create the settings file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Child list to inspect (.csv, .tsv or .txt).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Child list to import (.csv, .tsv or .txt).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// TOML file with mapping overrides and row decisions.
    #[arg(long = "plan", value_name = "PLAN")]
    pub plan: Option<PathBuf>,

    /// Stop after preview and print the request that would be executed.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write the import result as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Backend base URL (overrides the settings file).
    #[arg(long = "server", value_name = "URL")]
    pub server: Option<String>,

    /// Request timeout in seconds (overrides the settings file).
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Import the first line as data instead of headers.
    #[arg(long = "no-skip-header")]
    pub no_skip_header: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the settings file location and the effective settings.
    Show,

    /// Write the effective settings to the settings file.
    Init {
        /// Replace an existing settings file.
        #[arg(long = "force")]
        force: bool,
    },
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
