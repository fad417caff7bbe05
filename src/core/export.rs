//! CSV export and import of the dataset tables
//!
//! Exports are UTF-8, comma separated, `\n` terminated, with a header row and
//! no index column. Numbers are written as plain integers. Importing an
//! exported file and writing it again reproduces the same bytes.

use clap::ValueEnum;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use miette::Diagnostic;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::dataset;
use crate::core::entity::{Entity, Stack};
use crate::entities::{CostItem, FactorScore, FeatureRow, RiskLevel, Support, TimelinePhase};

/// The exportable dataset tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TableKind {
    /// Factor scores (comparison matrix)
    Factors,
    /// Implementation timeline phases
    Timeline,
    /// Cost breakdown
    Costs,
    /// Feature support
    Features,
}

const A: &str = Stack::Microsoft.column();
const B: &str = Stack::PowerApps.column();

static FACTOR_HEADERS: [&str; 3] = [FactorScore::LABEL_HEADER, A, B];
static PHASE_HEADERS: [&str; 4] = [TimelinePhase::LABEL_HEADER, A, B, "RiskLevel"];
static COST_HEADERS: [&str; 3] = [CostItem::LABEL_HEADER, A, B];
static FEATURE_HEADERS: [&str; 4] = [FeatureRow::LABEL_HEADER, A, B, "Notes"];

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Factors,
        TableKind::Timeline,
        TableKind::Costs,
        TableKind::Features,
    ];

    /// Default file name for downloads
    pub fn file_name(&self) -> &'static str {
        match self {
            TableKind::Factors => "comparison_data.csv",
            TableKind::Timeline => "timeline_data.csv",
            TableKind::Costs => "cost_analysis.csv",
            TableKind::Features => "feature_comparison.csv",
        }
    }

    /// Header row, in column order
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            TableKind::Factors => &FACTOR_HEADERS,
            TableKind::Timeline => &PHASE_HEADERS,
            TableKind::Costs => &COST_HEADERS,
            TableKind::Features => &FEATURE_HEADERS,
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Factors => write!(f, "factors"),
            TableKind::Timeline => write!(f, "timeline"),
            TableKind::Costs => write!(f, "costs"),
            TableKind::Features => write!(f, "features"),
        }
    }
}

/// Errors from reading or writing table CSV
#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("IO error: {0}")]
    #[diagnostic(code(stackcmp::export::io))]
    Io(#[from] std::io::Error),

    #[error("CSV error in {table} table: {source}")]
    #[diagnostic(code(stackcmp::export::csv))]
    Csv {
        table: TableKind,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid {table} row {row}: {source}")]
    #[diagnostic(
        code(stackcmp::export::row),
        help("row numbers count the header as row 1")
    )]
    Row {
        table: TableKind,
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Header mismatch in {table} table: expected '{expected}', found '{found}'")]
    #[diagnostic(
        code(stackcmp::export::header),
        help("run `stackcmp export <table>` to see the expected layout")
    )]
    HeaderMismatch {
        table: TableKind,
        expected: String,
        found: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorRecord {
    #[serde(rename = "Factor")]
    pub factor: String,
    #[serde(rename = "MicrosoftStack")]
    pub microsoft: u8,
    #[serde(rename = "AzurePowerApps")]
    pub power_apps: u8,
}

impl From<&FactorScore> for FactorRecord {
    fn from(row: &FactorScore) -> Self {
        Self {
            factor: row.factor.to_string(),
            microsoft: row.microsoft,
            power_apps: row.power_apps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRecord {
    #[serde(rename = "Phase")]
    pub phase: String,
    #[serde(rename = "MicrosoftStack")]
    pub microsoft_days: u32,
    #[serde(rename = "AzurePowerApps")]
    pub power_apps_days: u32,
    #[serde(rename = "RiskLevel")]
    pub risk: RiskLevel,
}

impl From<&TimelinePhase> for PhaseRecord {
    fn from(row: &TimelinePhase) -> Self {
        Self {
            phase: row.phase.to_string(),
            microsoft_days: row.microsoft_days,
            power_apps_days: row.power_apps_days,
            risk: row.risk,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRecord {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "MicrosoftStack")]
    pub microsoft: u32,
    #[serde(rename = "AzurePowerApps")]
    pub power_apps: u32,
}

impl From<&CostItem> for CostRecord {
    fn from(row: &CostItem) -> Self {
        Self {
            category: row.category.to_string(),
            microsoft: row.microsoft,
            power_apps: row.power_apps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "MicrosoftStack")]
    pub microsoft: Support,
    #[serde(rename = "AzurePowerApps")]
    pub power_apps: Support,
    #[serde(rename = "Notes")]
    pub note: String,
}

impl From<&FeatureRow> for FeatureRecord {
    fn from(row: &FeatureRow) -> Self {
        Self {
            feature: row.feature.to_string(),
            microsoft: row.microsoft,
            power_apps: row.power_apps,
            note: row.note.to_string(),
        }
    }
}

/// Typed rows of one table, either built-in or read back from CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRecords {
    Factors(Vec<FactorRecord>),
    Timeline(Vec<PhaseRecord>),
    Costs(Vec<CostRecord>),
    Features(Vec<FeatureRecord>),
}

impl TableRecords {
    /// Records for the compiled-in table
    pub fn builtin(kind: TableKind) -> Self {
        match kind {
            TableKind::Factors => {
                TableRecords::Factors(dataset::factor_scores().iter().map(Into::into).collect())
            }
            TableKind::Timeline => {
                TableRecords::Timeline(dataset::timeline_phases().iter().map(Into::into).collect())
            }
            TableKind::Costs => {
                TableRecords::Costs(dataset::cost_items().iter().map(Into::into).collect())
            }
            TableKind::Features => {
                TableRecords::Features(dataset::feature_rows().iter().map(Into::into).collect())
            }
        }
    }

    pub fn kind(&self) -> TableKind {
        match self {
            TableRecords::Factors(_) => TableKind::Factors,
            TableRecords::Timeline(_) => TableKind::Timeline,
            TableRecords::Costs(_) => TableKind::Costs,
            TableRecords::Features(_) => TableKind::Features,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TableRecords::Factors(rows) => rows.len(),
            TableRecords::Timeline(rows) => rows.len(),
            TableRecords::Costs(rows) => rows.len(),
            TableRecords::Features(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 1-based data row numbers that differ from `other`, including rows
    /// present in only one of the two tables
    pub fn mismatched_rows(&self, other: &TableRecords) -> Vec<usize> {
        fn diff<T: PartialEq>(a: &[T], b: &[T]) -> Vec<usize> {
            (0..a.len().max(b.len()))
                .filter(|&i| a.get(i) != b.get(i))
                .map(|i| i + 1)
                .collect()
        }

        match (self, other) {
            (TableRecords::Factors(a), TableRecords::Factors(b)) => diff(a, b),
            (TableRecords::Timeline(a), TableRecords::Timeline(b)) => diff(a, b),
            (TableRecords::Costs(a), TableRecords::Costs(b)) => diff(a, b),
            (TableRecords::Features(a), TableRecords::Features(b)) => diff(a, b),
            _ => (1..=self.len().max(other.len())).collect(),
        }
    }

    /// Write this table as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        let kind = self.kind();
        match self {
            TableRecords::Factors(rows) => write_records(kind, rows, writer),
            TableRecords::Timeline(rows) => write_records(kind, rows, writer),
            TableRecords::Costs(rows) => write_records(kind, rows, writer),
            TableRecords::Features(rows) => write_records(kind, rows, writer),
        }
    }

    pub fn to_csv_string(&self) -> Result<String, ExportError> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        // Every field comes from a String or a number, so the output is UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Export one built-in table as CSV
pub fn write_csv<W: Write>(kind: TableKind, writer: W) -> Result<(), ExportError> {
    TableRecords::builtin(kind).write_csv(writer)
}

/// Export one built-in table to a CSV string
pub fn to_csv_string(kind: TableKind) -> Result<String, ExportError> {
    TableRecords::builtin(kind).to_csv_string()
}

/// Parse CSV produced by [`write_csv`] back into typed records
pub fn read_csv<R: Read>(kind: TableKind, reader: R) -> Result<TableRecords, ExportError> {
    let records = match kind {
        TableKind::Factors => TableRecords::Factors(read_records(kind, reader)?),
        TableKind::Timeline => TableRecords::Timeline(read_records(kind, reader)?),
        TableKind::Costs => TableRecords::Costs(read_records(kind, reader)?),
        TableKind::Features => TableRecords::Features(read_records(kind, reader)?),
    };
    tracing::debug!(table = %kind, rows = records.len(), "imported table");
    Ok(records)
}

/// Export one table to a file
pub fn export_to_file(kind: TableKind, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(kind, BufWriter::new(file))?;
    tracing::debug!(table = %kind, path = %path.display(), "exported table");
    Ok(())
}

/// Export every table into `dir` using the default file names
pub fn export_all(dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir)?;
    TableKind::ALL
        .iter()
        .map(|kind| {
            let path = dir.join(kind.file_name());
            export_to_file(*kind, &path)?;
            Ok(path)
        })
        .collect()
}

fn write_records<W: Write, T: Serialize>(
    kind: TableKind,
    rows: &[T],
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    // Header is written explicitly so an empty table still carries it
    wtr.write_record(kind.headers())
        .map_err(|source| ExportError::Csv { table: kind, source })?;
    for row in rows {
        wtr.serialize(row)
            .map_err(|source| ExportError::Csv { table: kind, source })?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_records<R: Read, T: DeserializeOwned>(
    kind: TableKind,
    reader: R,
) -> Result<Vec<T>, ExportError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|source| ExportError::Csv { table: kind, source })?
        .clone();
    let found: Vec<&str> = headers.iter().collect();
    if found != kind.headers() {
        return Err(ExportError::HeaderMismatch {
            table: kind,
            expected: kind.headers().join(","),
            found: found.join(","),
        });
    }

    rdr.deserialize()
        .enumerate()
        .map(|(idx, record)| {
            record.map_err(|source| ExportError::Row {
                table: kind,
                row: idx + 2,
                source,
            })
        })
        .collect()
}
