pub mod report;

use crate::types::{DisplayFilter, InspectOptions};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for dcmpeek
#[derive(Parser, Debug)]
#[command(name = "dcmpeek")]
#[command(about = "Inspect, search and extract pixel data from DICOM files")]
#[command(version)]
pub struct Cli {
    /// DICOM file or directory of DICOM files
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Descend into sub-directories
    #[arg(short, long)]
    pub recursive: bool,

    /// Write pixel data frames into this directory
    #[arg(short = 'x', long = "extract", value_name = "DIR")]
    pub extract: Option<PathBuf>,

    /// Only print tags whose name matches this case-insensitive regex
    #[arg(short, long, value_name = "REGEX", default_value = "")]
    pub search: String,

    /// Print every known tag instead of the standard selection
    #[arg(short, long)]
    pub verbose: bool,

    /// Print values only, without tag names
    #[arg(short, long = "no-banner")]
    pub no_banner: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Library options for this invocation
    pub fn options(&self) -> InspectOptions {
        let mut options = InspectOptions::default()
            .with_search(self.search.as_str())
            .with_filter(DisplayFilter::from_verbose(self.verbose))
            .with_compact_output(self.no_banner);
        if let Some(dir) = &self.extract {
            options = options.with_extract_dir(dir);
        }
        options
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// One JSON object per file
    Json,
}
