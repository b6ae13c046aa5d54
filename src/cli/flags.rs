use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::types::{OutputFormat, Surface};

#[derive(Parser, Debug)]
#[command(
    name = "remediation-due",
    version,
    about = "Compute remediation due dates for security findings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (TOML). Default: config/remediation-due.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (debug, trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also append logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the due date of one finding record
    Compute {
        /// Host record as a JSON object of field name to value
        #[arg(long)]
        record: Option<PathBuf>,
        /// Host field as NAME=VALUE; overrides the record file
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
        /// Override the configured surface
        #[arg(long, value_enum)]
        surface: Option<SurfaceArg>,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormatArg,
    },
    /// Print the effective offset table
    Table {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormatArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SurfaceArg {
    FieldCalculation,
    Template,
}

impl From<SurfaceArg> for Surface {
    fn from(value: SurfaceArg) -> Self {
        match value {
            SurfaceArg::FieldCalculation => Surface::FieldCalculation,
            SurfaceArg::Template => Surface::Template,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormatArg {
    Text,
    Json,
    Markdown,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}
