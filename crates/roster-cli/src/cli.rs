//! CLI argument definitions for the roster importer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "roster-cli",
    version,
    about = "Roster Importer - Bulk-create school users from delimited files",
    long_about = "Bulk-create school user accounts from a delimited roster file.\n\n\
                  Parses the file, maps its columns onto user fields, validates the\n\
                  rows, and creates one account per row, writing the created\n\
                  records as JSON Lines."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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

    /// Allow student names and emails to appear in log output.
    ///
    /// Row-level values are replaced with a redacted token unless this
    /// flag is set.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a roster file and create one user per row.
    Import(ImportArgs),

    /// Write the sample roster template.
    Template(TemplateArgs),

    /// List the user fields columns can be mapped onto.
    Fields,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Path to the roster file (.csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output file for created records, one JSON object per line.
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Override a column mapping (repeatable).
    ///
    /// Example: --map "Correo=email" maps the "Correo" column onto the
    /// email field, replacing whatever the automatic mapping chose.
    #[arg(long = "map", value_name = "COLUMN=FIELD")]
    pub map: Vec<String>,

    /// Remove a column from the mapping (repeatable).
    #[arg(long = "unmap", value_name = "COLUMN")]
    pub unmap: Vec<String>,

    /// Validate and preview without creating any users.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Maximum number of user creations in flight at once.
    ///
    /// All rows are submitted concurrently when this is not set.
    #[arg(long = "max-in-flight", value_name = "N")]
    pub max_in_flight: Option<usize>,
}

#[derive(Parser)]
pub struct TemplateArgs {
    /// Write the template to a file instead of stdout.
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,
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
