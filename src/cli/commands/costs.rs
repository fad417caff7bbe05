//! `stackcmp costs` - cost breakdown and total cost of ownership

use console::style;
use miette::Result;

use crate::cli::chart::{grouped_bars, legend, Series};
use crate::cli::commands::utils::{heading, json_string, subheading, write_output};
use crate::cli::helpers::{format_currency, format_dollars};
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{OutputFormat, RenderContext};
use crate::core::dataset;
use crate::core::style::{stack_tone, Tone};
use crate::core::{Entity, Stack};

const CHART_WIDTH: usize = 40;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("Category", "Category", 16),
    ColumnDef::new("MicrosoftStack", "Microsoft Stack", 16),
    ColumnDef::new("AzurePowerApps", "Azure Power Apps", 17),
];

pub fn run(ctx: &RenderContext) -> Result<()> {
    let out = render(ctx)?;
    write_output(&out, None, ctx.quiet)
}

pub fn render(ctx: &RenderContext) -> Result<String> {
    if ctx.format == OutputFormat::Json {
        return json_string(&to_json());
    }

    let mut out = heading(ctx, "Detailed Cost Analysis");

    if ctx.is_styled() {
        out.push_str(&subheading(ctx, "Cost Comparison by Category"));
        out.push_str(&chart(ctx));
        out.push('\n');
        if ctx.show_raw {
            out.push_str(&cost_table(ctx));
            out.push('\n');
        }
        out.push_str(&totals(ctx));
        return Ok(out);
    }

    out.push_str(&cost_table(ctx));
    if ctx.format == OutputFormat::Md {
        out.push('\n');
        out.push_str(&totals(ctx));
    }
    Ok(out)
}

fn chart(ctx: &RenderContext) -> String {
    let items = dataset::cost_items();
    let categories: Vec<&str> = items.iter().map(|c| c.category).collect();
    let series: Vec<Series<'_>> = Stack::ALL
        .iter()
        .map(|stack| Series {
            name: stack.display_name(),
            tone: stack_tone(*stack),
            values: items.iter().map(|c| f64::from(c.value(*stack))).collect(),
        })
        .collect();
    let max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0_f64, f64::max);

    let mut out = grouped_bars(&categories, &series, max, CHART_WIDTH, ctx.theme, |v| {
        format_dollars(v as i64)
    });
    let entries: Vec<(&str, Tone)> = series.iter().map(|s| (s.name, s.tone)).collect();
    out.push_str(&legend(&entries, ctx.theme));
    out
}

fn cost_table(ctx: &RenderContext) -> String {
    let rows: Vec<TableRow> = dataset::cost_items()
        .iter()
        .map(|c| {
            TableRow::new()
                .cell("Category", CellValue::Text(c.category.to_string()))
                .cell("MicrosoftStack", CellValue::Dollars(i64::from(c.microsoft)))
                .cell("AzurePowerApps", CellValue::Dollars(i64::from(c.power_apps)))
        })
        .collect();

    let config = if ctx.is_styled() {
        TableConfig::default()
    } else {
        TableConfig::for_pipe()
    };
    TableFormatter::new(COLUMNS, "category")
        .with_config(config)
        .with_theme(ctx.theme)
        .render(&rows, ctx.format)
}

/// Total cost metrics, each with its signed delta against the other stack
fn totals(ctx: &RenderContext) -> String {
    let mut out = String::new();
    for stack in Stack::ALL {
        let total = format_currency(dataset::total_cost(stack) as f64);
        let delta = format_currency(dataset::cost_delta(stack) as f64);
        match ctx.format {
            OutputFormat::Md => out.push_str(&format!(
                "- **Total {} Cost:** {} ({} vs {})\n",
                stack.display_name(),
                total,
                delta,
                stack.other().display_name()
            )),
            _ => {
                // Spending more than the other stack is the bad direction
                let tone = if dataset::cost_delta(stack) > 0 {
                    Tone::Red
                } else {
                    Tone::Green
                };
                out.push_str(&format!(
                    "{:<28} {}  {}\n",
                    format!("Total {} Cost", stack.display_name()),
                    style(total).bold(),
                    ctx.paint(&delta, tone)
                ));
            }
        }
    }
    out
}

/// Cost items plus per-stack totals and deltas
pub fn to_json() -> serde_json::Value {
    let totals: serde_json::Map<String, serde_json::Value> = Stack::ALL
        .iter()
        .map(|stack| {
            (
                stack.column().to_string(),
                serde_json::json!({
                    "total": dataset::total_cost(*stack),
                    "delta": dataset::cost_delta(*stack),
                }),
            )
        })
        .collect();
    serde_json::json!({
        "items": dataset::cost_items(),
        "totals": totals,
    })
}
