//! `stackcmp factors` - comparison matrix of factor scores

use miette::Result;

use crate::cli::chart::{grouped_bars, legend, Series};
use crate::cli::commands::utils::{heading, json_string, subheading, write_output};
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{OutputFormat, RenderContext};
use crate::core::dataset;
use crate::core::style::stack_tone;
use crate::core::{Entity, Stack};
use crate::entities::factor::MAX_SCORE;
use crate::entities::FactorScore;

const CHART_WIDTH: usize = 30;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("Factor", "Factor", 26),
    ColumnDef::new("MicrosoftStack", "Microsoft Stack", 16),
    ColumnDef::new("AzurePowerApps", "Azure Power Apps", 17),
    ColumnDef::new("Difference", "Difference", 11),
];

#[derive(clap::Args, Debug, Clone, Default)]
pub struct FactorsArgs {
    /// Hide factors where both stacks score below this value
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub min_score: u8,

    /// Highlight these factors (repeatable or comma separated)
    #[arg(long, value_delimiter = ',')]
    pub focus: Vec<String>,
}

impl FactorsArgs {
    /// Factors with at least one score at or above the threshold
    pub fn visible(&self) -> Vec<&'static FactorScore> {
        dataset::factor_scores()
            .iter()
            .filter(|f| f.microsoft.max(f.power_apps) >= self.min_score)
            .collect()
    }

    pub fn is_focused(&self, factor: &str) -> bool {
        self.focus
            .iter()
            .any(|name| name.trim().eq_ignore_ascii_case(factor))
    }

    /// Focus names that match no factor
    pub fn unknown_focus(&self) -> Vec<&str> {
        self.focus
            .iter()
            .map(|name| name.trim())
            .filter(|name| {
                !dataset::factor_scores()
                    .iter()
                    .any(|f| f.factor.eq_ignore_ascii_case(name))
            })
            .collect()
    }
}

pub fn run(args: FactorsArgs, ctx: &RenderContext) -> Result<()> {
    for name in args.unknown_focus() {
        tracing::warn!(factor = name, "focus names no known factor");
    }
    let out = render(&args, ctx)?;
    write_output(&out, None, ctx.quiet)
}

pub fn render(args: &FactorsArgs, ctx: &RenderContext) -> Result<String> {
    if ctx.format == OutputFormat::Json {
        return json_string(&to_json(args));
    }

    let factors = args.visible();
    let mut out = heading(ctx, "Comprehensive Comparison Matrix");

    if ctx.is_styled() {
        out.push_str(&subheading(ctx, "Score Profile"));
        if factors.is_empty() {
            out.push_str(&format!(
                "No factor scores {} or higher.\n",
                args.min_score
            ));
        } else {
            let labels: Vec<String> = factors
                .iter()
                .map(|f| {
                    if args.is_focused(f.factor) {
                        console::style(f.factor).bold().to_string()
                    } else {
                        f.factor.to_string()
                    }
                })
                .collect();
            let categories: Vec<&str> = labels.iter().map(String::as_str).collect();
            let series: Vec<Series<'_>> = Stack::ALL
                .iter()
                .map(|stack| Series {
                    name: stack.display_name(),
                    tone: stack_tone(*stack),
                    values: factors.iter().map(|f| f64::from(f.value(*stack))).collect(),
                })
                .collect();
            out.push_str(&grouped_bars(
                &categories,
                &series,
                f64::from(MAX_SCORE),
                CHART_WIDTH,
                ctx.theme,
                |v| format!("{:.0}", v),
            ));
            let items: Vec<(&str, _)> = series.iter().map(|s| (s.name, s.tone)).collect();
            out.push_str(&legend(&items, ctx.theme));
        }
        if !ctx.show_raw {
            return Ok(out);
        }
        out.push('\n');
    }

    out.push_str(&subheading(ctx, "Score Summary"));
    out.push_str(&score_table(&factors, args, ctx));
    Ok(out)
}

fn score_table(factors: &[&FactorScore], args: &FactorsArgs, ctx: &RenderContext) -> String {
    let rows: Vec<TableRow> = factors
        .iter()
        .map(|f| {
            let label = if args.is_focused(f.factor) {
                CellValue::Highlight(f.factor.to_string())
            } else {
                CellValue::Text(f.factor.to_string())
            };
            TableRow::new()
                .cell("Factor", label)
                .cell("MicrosoftStack", CellValue::Score(f.microsoft))
                .cell("AzurePowerApps", CellValue::Score(f.power_apps))
                .cell("Difference", CellValue::Delta(f64::from(f.difference())))
        })
        .collect();

    let config = if ctx.is_styled() {
        TableConfig::default()
    } else {
        TableConfig::for_pipe()
    };
    TableFormatter::new(COLUMNS, "factor")
        .with_config(config)
        .with_theme(ctx.theme)
        .render(&rows, ctx.format)
}

/// Visible factors with their differences and focus flags
pub fn to_json(args: &FactorsArgs) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = args
        .visible()
        .iter()
        .map(|f| {
            serde_json::json!({
                "Factor": f.factor,
                "MicrosoftStack": f.microsoft,
                "AzurePowerApps": f.power_apps,
                "Difference": f.difference(),
                "Focused": args.is_focused(f.factor),
            })
        })
        .collect();
    serde_json::Value::Array(rows)
}
