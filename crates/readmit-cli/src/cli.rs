//! CLI argument definitions for the readmission dataset builder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "readmit",
    version,
    about = "Build a 30-day readmission modeling table from admissions and clinical notes",
    long_about = "Build a readmission modeling table from MIMIC-style exports.\n\n\
                  Links each admission to the patient's next unplanned admission,\n\
                  attaches one discharge summary per stay, and drops newborn stays."
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

    /// Allow note text and other row values in trace logs.
    ///
    /// Note text is protected health information. Without this flag every
    /// row value is replaced with `[REDACTED]`.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the pipeline and write the merged table.
    Build(BuildArgs),

    /// List the input columns each table must provide.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Admissions CSV (one row per hospital stay).
    #[arg(value_name = "ADMISSIONS_CSV")]
    pub admissions: PathBuf,

    /// Clinical notes CSV.
    #[arg(value_name = "NOTES_CSV")]
    pub notes: PathBuf,

    /// Output CSV path (default: merged.csv next to the admissions file).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// TOML file with pipeline options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Timestamp format for admit, discharge, and death times.
    #[arg(long = "timestamp-format", value_name = "FMT")]
    pub timestamp_format: Option<String>,

    /// Note category treated as the discharge summary.
    #[arg(long = "discharge-category", value_name = "CATEGORY")]
    pub discharge_category: Option<String>,

    /// Run the pipeline and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// TOML file with column name overrides.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
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
