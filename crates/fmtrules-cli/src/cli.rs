//! CLI argument definitions for the rule registry front end.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fmtrules",
    version,
    about = "Inspect and apply named text-format validation rules",
    long_about = "Inspect and apply named text-format validation rules.\n\n\
                  Ships built-in rules for emails, URLs, phone numbers, IPv4\n\
                  addresses and more. Custom rules can be loaded from a JSON file."
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

    /// JSON file of custom rules to register before running the command.
    ///
    /// Rules with the name of a built-in replace it.
    #[arg(long = "rules", value_name = "PATH", global = true)]
    pub rules: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List all registered rules.
    List(ListArgs),

    /// Show a single rule.
    Show(ShowArgs),

    /// Check values against the rule for an attribute.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct ListArgs {
    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Rule name.
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Attribute name; also the rule name unless --using is given.
    #[arg(value_name = "ATTRIBUTE")]
    pub attribute: String,

    /// Values to check.
    #[arg(value_name = "VALUE", required = true)]
    pub values: Vec<String>,

    /// Rule to use instead of the attribute name.
    #[arg(long = "using", value_name = "RULE")]
    pub using: Option<String>,
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
