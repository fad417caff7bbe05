//! `stackcmp verify` - check an exported CSV against the built-in table

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

use crate::cli::commands::utils::json_string;
use crate::cli::{OutputFormat, RenderContext};
use crate::core::export::{self, TableKind, TableRecords};

#[derive(clap::Args, Debug)]
pub struct VerifyArgs {
    /// CSV file to check
    pub file: PathBuf,

    /// Table the file holds (detected from the file name or header if omitted)
    #[arg(long, short = 't', value_enum)]
    pub table: Option<TableKind>,
}

/// Outcome of comparing an imported table with the built-in one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub table: TableKind,
    pub rows: usize,
    /// 1-based data rows that differ
    pub mismatched: Vec<usize>,
    /// Re-exporting the parsed rows reproduces the file's bytes
    pub round_trips: bool,
}

impl Verification {
    pub fn matches(&self) -> bool {
        self.mismatched.is_empty()
    }
}

/// Pick the table for a file: explicit choice, then file name, then header row
pub fn detect_kind(path: &Path, contents: &str, explicit: Option<TableKind>) -> Result<TableKind> {
    if let Some(kind) = explicit {
        return Ok(kind);
    }
    let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if let Some(kind) = TableKind::ALL.iter().find(|k| k.file_name() == file_name) {
        return Ok(*kind);
    }
    let header = contents.lines().next().unwrap_or("").trim_end_matches('\r');
    TableKind::ALL
        .iter()
        .find(|k| k.headers().join(",") == header)
        .copied()
        .ok_or_else(|| {
            miette::miette!(
                help = "pass --table factors|timeline|costs|features",
                "Cannot tell which table {} holds",
                path.display()
            )
        })
}

/// Parse `contents` as `kind` and compare with the built-in rows
pub fn verify_contents(kind: TableKind, contents: &str) -> Result<Verification> {
    let imported = export::read_csv(kind, contents.as_bytes())?;
    let builtin = TableRecords::builtin(kind);
    let normalized = contents.replace("\r\n", "\n");
    Ok(Verification {
        table: kind,
        rows: imported.len(),
        mismatched: imported.mismatched_rows(&builtin),
        round_trips: imported.to_csv_string()? == normalized,
    })
}

pub fn run(args: VerifyArgs, ctx: &RenderContext) -> Result<()> {
    let contents = std::fs::read_to_string(&args.file).into_diagnostic()?;
    let kind = detect_kind(&args.file, &contents, args.table)?;
    let result = verify_contents(kind, &contents)?;
    tracing::debug!(
        table = %kind,
        rows = result.rows,
        mismatched = result.mismatched.len(),
        "verified table"
    );

    if ctx.format == OutputFormat::Json {
        print!(
            "{}",
            json_string(&serde_json::json!({
                "file": args.file.display().to_string(),
                "table": kind.to_string(),
                "rows": result.rows,
                "matches": result.matches(),
                "mismatched_rows": result.mismatched,
                "round_trips": result.round_trips,
            }))?
        );
    } else if result.matches() && !ctx.quiet {
        println!(
            "{} {} matches the built-in {} table ({} rows)",
            style("✓").green(),
            style(args.file.display()).cyan(),
            kind,
            result.rows
        );
        if !result.round_trips {
            println!(
                "{} re-exported bytes differ (quoting or spacing changed)",
                style("!").yellow()
            );
        }
    }

    if !result.matches() {
        let rows: Vec<String> = result.mismatched.iter().map(|r| r.to_string()).collect();
        return Err(miette::miette!(
            code = "stackcmp::verify::mismatch",
            "{} differs from the built-in {} table at data row(s) {}",
            args.file.display(),
            kind,
            rows.join(", ")
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_kind() {
        let costs = export::to_csv_string(TableKind::Costs).unwrap();
        assert_eq!(
            detect_kind(Path::new("cost_analysis.csv"), "", None).unwrap(),
            TableKind::Costs
        );
        assert_eq!(
            detect_kind(Path::new("renamed.csv"), &costs, None).unwrap(),
            TableKind::Costs
        );
        assert_eq!(
            detect_kind(Path::new("renamed.csv"), "", Some(TableKind::Factors)).unwrap(),
            TableKind::Factors
        );
        assert!(detect_kind(Path::new("renamed.csv"), "a,b\n", None).is_err());
    }

    #[test]
    fn test_verify_exported_table() {
        for kind in TableKind::ALL {
            let csv = export::to_csv_string(kind).unwrap();
            let result = verify_contents(kind, &csv).unwrap();
            assert!(result.matches());
            assert!(result.round_trips);
        }
    }

    #[test]
    fn test_verify_crlf_still_round_trips() {
        let csv = export::to_csv_string(TableKind::Factors)
            .unwrap()
            .replace('\n', "\r\n");
        let result = verify_contents(TableKind::Factors, &csv).unwrap();
        assert!(result.matches());
        assert!(result.round_trips);
    }

    #[test]
    fn test_verify_reports_changed_rows() {
        let csv = export::to_csv_string(TableKind::Costs)
            .unwrap()
            .replace("Training,20000,30000", "Training,20000,31000");
        let result = verify_contents(TableKind::Costs, &csv).unwrap();
        assert_eq!(result.mismatched, vec![4]);
        assert!(!result.matches());
    }

    #[test]
    fn test_verify_missing_row() {
        let csv = export::to_csv_string(TableKind::Costs)
            .unwrap()
            .replace("Maintenance,25000,15000\n", "");
        let result = verify_contents(TableKind::Costs, &csv).unwrap();
        assert_eq!(result.rows, 4);
        assert_eq!(result.mismatched, vec![5]);
    }
}
