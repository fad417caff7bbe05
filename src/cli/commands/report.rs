//! `stackcmp report` - full report export (not yet available)

use clap::ValueEnum;
use console::style;
use miette::Result;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Full text report
    #[default]
    Full,
    /// PDF document
    Pdf,
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Full)]
    pub kind: ReportFormat,

    /// Output file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn notice(kind: ReportFormat) -> &'static str {
    match kind {
        ReportFormat::Full => "Full report export will be available in the next version",
        ReportFormat::Pdf => "PDF export functionality will be implemented in the next version",
    }
}

/// Print the not-yet-available notice; never writes a file
pub fn run(args: ReportArgs) -> Result<()> {
    if let Some(path) = &args.output {
        tracing::debug!(path = %path.display(), "report output path ignored");
    }
    eprintln!("{} {}", style("ℹ").blue(), notice(args.kind));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices() {
        assert!(notice(ReportFormat::Full).starts_with("Full report export"));
        assert!(notice(ReportFormat::Pdf).starts_with("PDF export"));
    }

    #[test]
    fn test_run_succeeds_without_writing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("report.pdf");
        run(ReportArgs {
            kind: ReportFormat::Pdf,
            output: Some(path.clone()),
        })
        .unwrap();
        assert!(!path.exists());
    }
}
