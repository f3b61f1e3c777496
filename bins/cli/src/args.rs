//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tia_core::invoice::LineItemInput;
use tia_core::render::{DocumentWriter, JsonWriter, LatexWriter, TextWriter};

#[derive(Debug, Parser)]
#[command(name = "tia", version, about = "Tax and invoice assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render an invoice file
    Render(RenderArgs),
}

#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Invoice file (TOML)
    pub invoice: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write the document to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Extra configuration file layered over config/default
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Additional item "label;qty;price[;rate[;note]]", appended after the file's items
    #[arg(short, long = "item", value_name = "ITEM")]
    pub items: Vec<LineItemInput>,
}

/// Output format of the rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width plain text
    Text,
    /// LaTeX body using the invoice macros
    Latex,
    /// The document model as JSON
    Json,
}

impl OutputFormat {
    pub fn writer(self) -> Box<dyn DocumentWriter> {
        match self {
            Self::Text => Box::new(TextWriter),
            Self::Latex => Box::new(LatexWriter),
            Self::Json => Box::new(JsonWriter),
        }
    }
}
