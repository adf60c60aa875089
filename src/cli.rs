use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagecut")]
#[command(about = "Cut pages out of a PDF, as a new PDF or as plain text")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server over stdio
    Mcp,

    /// Show the page count and basic metadata of a PDF
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Copy selected pages into a new PDF
    #[command(alias = "cat")]
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// Pages to keep (e.g., "1, 3, 5-10, 15")
        pages: String,

        /// Output file (default: <name>_pages_<range>.pdf in the output directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for the default output file
        #[arg(short = 'd', long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Dump the text of selected pages
    #[command(alias = "read-pages")]
    Text {
        /// PDF file to read
        path: PathBuf,

        /// Pages to read (e.g., "1-5,10")
        pages: String,

        /// Write the text to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
