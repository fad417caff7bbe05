//! Table formatting utilities for the dashboard views
//!
//! This module provides a unified table output system shared by every
//! dataset view.
//!
//! # Text Wrapping
//!
//! The table formatter supports text wrapping for long notes:
//! - Use `TableConfig::with_wrap(width)` to enable word-wrapped multi-line rows
//! - CSV and JSON formats remain single-line for pipability
//! - Terminal and TSV output support wrapped rows

use console::{measure_text_width, pad_str, style, Alignment};

use crate::cli::helpers::{csv_records, format_currency, format_dollars, format_signed, truncate_str};
use crate::cli::OutputFormat;
use crate::core::style::{diverging_tone, paint, risk_tone, support_symbol, Theme, Tone, DIFFERENCE_SCALE};
use crate::entities::{RiskLevel, Support};

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Maximum width for text columns before wrapping (None = truncate instead)
    pub wrap_width: Option<usize>,
    /// Show summary line after table (e.g., "10 factor(s)")
    pub show_summary: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            wrap_width: None,
            show_summary: true,
        }
    }
}

impl TableConfig {
    /// Create config with text wrapping enabled at the specified width
    pub fn with_wrap(width: usize) -> Self {
        Self {
            wrap_width: Some(width),
            show_summary: true,
        }
    }

    /// Create config optimized for piping (no wrapping, no summary)
    pub fn for_pipe() -> Self {
        Self {
            wrap_width: None,
            show_summary: false,
        }
    }
}

/// Wrap text to fit within a maximum width, breaking at word boundaries
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    // Don't wrap if text already fits or width is too small to be useful
    if text.chars().count() <= max_width || max_width < 5 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.chars().count() + 1 + word.chars().count() <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Plain text, optionally truncated
    Text(String),
    /// Emphasized text (focused factors)
    Highlight(String),
    /// Factor score (0-10), shown with one decimal
    Score(u8),
    /// Signed score difference, tinted on the red-yellow-green scale
    Delta(f64),
    /// Duration in days
    Days(u32),
    /// Whole-dollar amount
    Dollars(i64),
    /// Dollar amount with cents
    Currency(f64),
    /// Phase risk level with color coding
    Risk(RiskLevel),
    /// Feature support level (symbol in terminal output)
    Support(Support),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Text shown in terminal and TSV output (before padding and color)
    fn display(&self) -> String {
        match self {
            CellValue::Text(s) | CellValue::Highlight(s) => s.clone(),
            CellValue::Score(n) => format!("{:.1}", f64::from(*n)),
            CellValue::Delta(d) => format_signed(*d),
            CellValue::Days(d) => d.to_string(),
            CellValue::Dollars(n) => format_dollars(*n),
            CellValue::Currency(v) => format_currency(*v),
            CellValue::Risk(r) => r.to_string(),
            CellValue::Support(s) => support_symbol(*s).to_string(),
            CellValue::Empty => "-".to_string(),
        }
    }

    fn tone(&self) -> Tone {
        match self {
            CellValue::Delta(d) => diverging_tone(*d, DIFFERENCE_SCALE),
            CellValue::Risk(r) => risk_tone(*r),
            _ => Tone::Neutral,
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellValue::Score(_)
                | CellValue::Delta(_)
                | CellValue::Days(_)
                | CellValue::Dollars(_)
                | CellValue::Currency(_)
        )
    }

    /// Format for terminal output: padded to `width`, colored by tone
    pub fn format_tsv(&self, width: usize, theme: Theme) -> String {
        let text = match self {
            CellValue::Text(s) | CellValue::Highlight(s) => {
                truncate_str(s, width.saturating_sub(2).max(4))
            }
            _ => self.display(),
        };
        let align = if self.is_numeric() {
            Alignment::Right
        } else {
            Alignment::Left
        };
        let padded = pad_str(&text, width, align, None).into_owned();
        match self {
            CellValue::Highlight(_) => style(padded).bold().to_string(),
            CellValue::Empty => style(padded).dim().to_string(),
            _ => paint(&padded, self.tone(), theme),
        }
    }

    /// Unquoted CSV field (no colors, plain numbers); quoting is left to the writer
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Text(s) | CellValue::Highlight(s) => s.clone(),
            CellValue::Score(n) => n.to_string(),
            CellValue::Delta(d) => format!("{}", d),
            CellValue::Days(d) => d.to_string(),
            CellValue::Dollars(n) => n.to_string(),
            CellValue::Currency(v) => format!("{:.2}", v),
            CellValue::Risk(r) => r.to_string(),
            CellValue::Support(s) => s.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Highlight(s) => format!("**{}**", s),
            CellValue::Risk(r) => format!("{} {}", crate::core::style::risk_symbol(*r), r),
            _ => self.display(),
        };
        // Escape pipe characters for markdown tables
        raw.replace('|', "\\|")
    }

    /// Value for JSON output
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Text(s) | CellValue::Highlight(s) => serde_json::Value::from(s.as_str()),
            CellValue::Score(n) => serde_json::Value::from(*n),
            CellValue::Delta(d) => serde_json::Value::from(*d),
            CellValue::Days(d) => serde_json::Value::from(*d),
            CellValue::Dollars(n) => serde_json::Value::from(*n),
            CellValue::Currency(v) => serde_json::Value::from(*v),
            CellValue::Risk(r) => serde_json::Value::from(r.to_string()),
            CellValue::Support(s) => serde_json::Value::from(s.to_string()),
            CellValue::Empty => serde_json::Value::Null,
        }
    }

    /// Get the display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        measure_text_width(&self.display())
    }
}

/// Column definition with key, header label and maximum width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
#[derive(Debug, Clone, Default)]
pub struct TableRow {
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that renders rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    row_name: &'static str,
    config: TableConfig,
    theme: Theme,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], row_name: &'static str) -> Self {
        Self {
            columns,
            row_name,
            config: TableConfig::default(),
            theme: Theme::default(),
        }
    }

    /// Configure the formatter with custom settings
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Render rows in the specified format
    pub fn render(&self, rows: &[TableRow], format: OutputFormat) -> String {
        match format {
            OutputFormat::Auto | OutputFormat::Tsv => self.render_tsv(rows),
            OutputFormat::Csv => self.render_csv(rows),
            OutputFormat::Md => self.render_md(rows),
            OutputFormat::Json => self.render_json(rows),
        }
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        self.columns
            .iter()
            .map(|col| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| match (v, self.config.wrap_width) {
                        (CellValue::Text(_), Some(wrap)) => v.display_width().min(wrap),
                        _ => v.display_width(),
                    })
                    .max()
                    .unwrap_or(0);

                // Auto-size to the larger of header and content+2, capped at col.width
                let natural_width = col.header.len().max(max_content.saturating_add(2));
                natural_width.min(col.width.max(col.header.len()))
            })
            .collect()
    }

    fn render_tsv(&self, rows: &[TableRow]) -> String {
        let widths = self.calculate_widths(rows);
        let mut out = String::new();

        let header_parts: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| style(pad_str(col.header, *w, Alignment::Left, None)).bold().to_string())
            .collect();
        out.push_str(header_parts.join(" ").trim_end());
        out.push('\n');

        let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total_width));
        out.push('\n');

        for row in rows {
            match self.config.wrap_width {
                Some(wrap_width) => self.render_tsv_row_wrapped(&mut out, row, &widths, wrap_width),
                None => self.render_tsv_row_truncated(&mut out, row, &widths),
            }
        }

        // Summary (unless disabled for piping)
        if self.config.show_summary {
            out.push('\n');
            out.push_str(&format!("{} {}(s)\n", style(rows.len()).cyan(), self.row_name));
        }

        out
    }

    fn render_tsv_row_truncated(&self, out: &mut String, row: &TableRow, widths: &[usize]) {
        let parts: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .map(|(col, w)| match row.get(col.key) {
                Some(value) => value.format_tsv(*w, self.theme),
                None => CellValue::Empty.format_tsv(*w, self.theme),
            })
            .collect();
        out.push_str(parts.join(" ").trim_end());
        out.push('\n');
    }

    fn render_tsv_row_wrapped(
        &self,
        out: &mut String,
        row: &TableRow,
        widths: &[usize],
        wrap_width: usize,
    ) {
        // Only plain text wraps; other cells render on the first line
        let wrapped: Vec<Vec<String>> = self
            .columns
            .iter()
            .zip(widths)
            .map(|(col, w)| match row.get(col.key) {
                Some(CellValue::Text(s)) => wrap_text(s, wrap_width)
                    .into_iter()
                    .map(|line| pad_str(&line, *w, Alignment::Left, None).into_owned())
                    .collect(),
                Some(value) => vec![value.format_tsv(*w, self.theme)],
                None => vec![CellValue::Empty.format_tsv(*w, self.theme)],
            })
            .collect();

        let max_lines = wrapped.iter().map(|c| c.len()).max().unwrap_or(1);
        for line_idx in 0..max_lines {
            let parts: Vec<String> = wrapped
                .iter()
                .zip(widths)
                .map(|(lines, w)| {
                    lines
                        .get(line_idx)
                        .cloned()
                        .unwrap_or_else(|| " ".repeat(*w))
                })
                .collect();
            out.push_str(parts.join(" ").trim_end());
            out.push('\n');
        }
    }

    fn render_csv(&self, rows: &[TableRow]) -> String {
        let header: Vec<String> = self.columns.iter().map(|c| c.key.to_string()).collect();
        let body = rows.iter().map(|row| {
            self.columns
                .iter()
                .map(|col| row.get(col.key).map(|v| v.format_csv()).unwrap_or_default())
                .collect::<Vec<String>>()
        });
        csv_records(std::iter::once(header).chain(body))
    }

    fn render_md(&self, rows: &[TableRow]) -> String {
        let mut out = String::new();
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        out.push_str(&format!("| {} |\n", headers.join(" | ")));

        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        out.push_str(&format!("|{}|\n", separators.join("|")));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| {
                    row.get(col.key)
                        .map(|v| v.format_md())
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            out.push_str(&format!("| {} |\n", values.join(" | ")));
        }
        out
    }

    fn render_json(&self, rows: &[TableRow]) -> String {
        let items: Vec<serde_json::Value> = rows
            .iter()
            .map(|row| {
                let map: serde_json::Map<String, serde_json::Value> = self
                    .columns
                    .iter()
                    .map(|col| {
                        let value = row
                            .get(col.key)
                            .map(|v| v.to_json())
                            .unwrap_or(serde_json::Value::Null);
                        (col.key.to_string(), value)
                    })
                    .collect();
                serde_json::Value::Object(map)
            })
            .collect();
        let mut out = serde_json::to_string_pretty(&items).unwrap_or_default();
        out.push('\n');
        out
    }
}
