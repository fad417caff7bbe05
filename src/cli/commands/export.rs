//! `stackcmp export` - CSV export of the dataset tables

use clap::ValueEnum;
use console::style;
use miette::Result;
use std::path::{Path, PathBuf};

use crate::cli::commands::utils::write_output;
use crate::cli::RenderContext;
use crate::core::export::{self, TableKind};

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Table to export
    #[arg(value_enum)]
    pub table: ExportTarget,

    /// Write a single table to this file instead of stdout
    #[arg(long, short = 'o', conflicts_with = "dir")]
    pub output: Option<PathBuf>,

    /// Write into this directory using the default file names
    /// (`export all` defaults to the current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportTarget {
    /// comparison_data.csv
    Factors,
    /// timeline_data.csv
    Timeline,
    /// cost_analysis.csv
    Costs,
    /// feature_comparison.csv
    Features,
    /// All four tables
    All,
}

impl ExportTarget {
    /// The single table to export, or `None` for all of them
    pub fn table(self) -> Option<TableKind> {
        match self {
            ExportTarget::Factors => Some(TableKind::Factors),
            ExportTarget::Timeline => Some(TableKind::Timeline),
            ExportTarget::Costs => Some(TableKind::Costs),
            ExportTarget::Features => Some(TableKind::Features),
            ExportTarget::All => None,
        }
    }
}

pub fn run(args: ExportArgs, ctx: &RenderContext) -> Result<()> {
    match args.table.table() {
        Some(kind) => {
            let target = match (&args.output, &args.dir) {
                (Some(path), _) => Some(path.clone()),
                (None, Some(dir)) => {
                    std::fs::create_dir_all(dir).map_err(export::ExportError::from)?;
                    Some(dir.join(kind.file_name()))
                }
                (None, None) => None,
            };
            match target {
                Some(path) => {
                    export::export_to_file(kind, &path)?;
                    report_written(&path, ctx.quiet);
                }
                None => {
                    let csv = export::to_csv_string(kind)?;
                    write_output(&csv, None, ctx.quiet)?;
                }
            }
        }
        None => {
            if args.output.is_some() {
                return Err(miette::miette!(
                    help = "use --dir to choose where the four files go",
                    "`export all` writes several files and cannot use --output"
                ));
            }
            let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
            for path in export::export_all(&dir)? {
                report_written(&path, ctx.quiet);
            }
        }
    }
    Ok(())
}

fn report_written(path: &Path, quiet: bool) {
    if !quiet {
        eprintln!(
            "{} Exported {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }
}
