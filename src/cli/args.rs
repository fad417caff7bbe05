//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, export::ExportArgs,
    factors::FactorsArgs, report::ReportArgs, roi::RoiArgs, verify::VerifyArgs,
};
use crate::core::style::Theme;

#[derive(Parser)]
#[command(name = "stackcmp")]
#[command(author, version, about = "Microsoft Stack vs Azure Power Apps comparison dashboard")]
#[command(long_about = "A terminal dashboard comparing a traditional Microsoft stack with Azure Power Apps: factor scores, implementation timeline, costs, feature support and an ROI calculator.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct GlobalOpts {
    /// Output format (default: auto, or `default_format` from config)
    #[arg(long, short = 'f', global = true, ignore_case = true)]
    pub format: Option<OutputFormat>,

    /// Color theme
    #[arg(long, global = true, ignore_case = true)]
    pub theme: Option<Theme>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Hide raw data tables under charts
    #[arg(long, global = true)]
    pub no_raw: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every dashboard section in order
    Dashboard,

    /// Comparison matrix: factor scores and differences
    Factors(FactorsArgs),

    /// Implementation timeline with risk levels
    Timeline,

    /// Cost breakdown and total cost of ownership
    Costs,

    /// Feature support comparison
    Features,

    /// ROI calculator
    Roi(RoiArgs),

    /// Key findings and recommended approach
    Summary,

    /// Export dataset tables as CSV
    Export(ExportArgs),

    /// Check an exported CSV file against the built-in table
    Verify(VerifyArgs),

    /// Export the full report (not yet available)
    Report(ReportArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled terminal output with charts
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| format!("Unknown output format: {}", s))
    }
}
