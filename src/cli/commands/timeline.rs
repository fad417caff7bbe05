//! `stackcmp timeline` - implementation phases with risk levels

use console::{measure_text_width, pad_str, Alignment};
use miette::Result;

use crate::cli::chart::stacked_bar;
use crate::cli::commands::utils::{heading, json_string, subheading, write_output};
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{OutputFormat, RenderContext};
use crate::core::dataset;
use crate::core::style::{risk_symbol, risk_tone};
use crate::core::{Entity, Stack};
use crate::entities::RiskLevel;

const CHART_WIDTH: usize = 50;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("Phase", "Phase", 22),
    ColumnDef::new("MicrosoftStack", "Microsoft Stack (days)", 23),
    ColumnDef::new("AzurePowerApps", "Azure Power Apps (days)", 24),
    ColumnDef::new("RiskLevel", "Risk Level", 11),
];

pub fn run(ctx: &RenderContext) -> Result<()> {
    let out = render(ctx)?;
    write_output(&out, None, ctx.quiet)
}

pub fn render(ctx: &RenderContext) -> Result<String> {
    if ctx.format == OutputFormat::Json {
        return json_string(&to_json());
    }

    let mut out = heading(ctx, "Implementation Timeline Analysis");

    if ctx.is_styled() {
        out.push_str(&chart(ctx));
        out.push('\n');
        out.push_str(&subheading(ctx, "Risk Levels"));
        out.push_str(&risk_legend());
        out.push('\n');
        if !ctx.show_raw {
            return Ok(out);
        }
    }

    out.push_str(&phase_table(ctx));

    if ctx.format == OutputFormat::Md {
        out.push('\n');
        for stack in Stack::ALL {
            out.push_str(&format!(
                "- **{}:** {} days\n",
                stack.display_name(),
                dataset::total_duration(stack)
            ));
        }
        out.push('\n');
        out.push_str(&risk_legend());
    }
    Ok(out)
}

/// One stacked bar per stack, segments colored by phase risk
fn chart(ctx: &RenderContext) -> String {
    let max = Stack::ALL
        .iter()
        .map(|s| dataset::total_duration(*s))
        .max()
        .unwrap_or(0);
    let label_width = Stack::ALL
        .iter()
        .map(|s| measure_text_width(s.display_name()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for stack in Stack::ALL {
        let segments: Vec<(u32, _)> = dataset::timeline_phases()
            .iter()
            .map(|p| (p.value(stack), risk_tone(p.risk)))
            .collect();
        let bar = stacked_bar(&segments, f64::from(max), CHART_WIDTH, ctx.theme);
        out.push_str(&format!(
            "{} {} {} days\n",
            pad_str(stack.display_name(), label_width, Alignment::Left, None),
            pad_str(&bar, CHART_WIDTH, Alignment::Left, None),
            dataset::total_duration(stack)
        ));
    }
    out
}

fn risk_legend() -> String {
    let parts: Vec<String> = RiskLevel::ALL
        .iter()
        .map(|r| format!("{} {} Risk", risk_symbol(*r), r))
        .collect();
    format!("{}\n", parts.join("  "))
}

fn phase_table(ctx: &RenderContext) -> String {
    let rows: Vec<TableRow> = dataset::timeline_phases()
        .iter()
        .map(|p| {
            TableRow::new()
                .cell("Phase", CellValue::Text(p.phase.to_string()))
                .cell("MicrosoftStack", CellValue::Days(p.microsoft_days))
                .cell("AzurePowerApps", CellValue::Days(p.power_apps_days))
                .cell("RiskLevel", CellValue::Risk(p.risk))
        })
        .collect();

    let config = if ctx.is_styled() {
        TableConfig::default()
    } else {
        TableConfig::for_pipe()
    };
    TableFormatter::new(COLUMNS, "phase")
        .with_config(config)
        .with_theme(ctx.theme)
        .render(&rows, ctx.format)
}

/// Phases plus per-stack total days
pub fn to_json() -> serde_json::Value {
    serde_json::json!({
        "phases": dataset::timeline_phases(),
        "total_days": {
            "MicrosoftStack": dataset::total_duration(Stack::Microsoft),
            "AzurePowerApps": dataset::total_duration(Stack::PowerApps),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_csv() {
        let out = render(&RenderContext::plain(OutputFormat::Csv)).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Phase,MicrosoftStack,AzurePowerApps,RiskLevel");
        assert_eq!(lines[1], "Environment Setup,30,15,Low");
        assert_eq!(lines[3], "Core Features,60,45,High");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_render_md_has_totals_and_legend() {
        let out = render(&RenderContext::plain(OutputFormat::Md)).unwrap();
        assert!(out.contains("| Testing | 30 | 30 | 🟡 Medium |"));
        assert!(out.contains("- **Microsoft Stack:** 225 days"));
        assert!(out.contains("- **Azure Power Apps:** 165 days"));
        assert!(out.contains("🟢 Low Risk  🟡 Medium Risk  🔴 High Risk"));
    }

    #[test]
    fn test_render_json_totals() {
        let out = render(&RenderContext::plain(OutputFormat::Json)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["phases"].as_array().unwrap().len(), 6);
        assert_eq!(parsed["phases"][2]["RiskLevel"], "High");
        assert_eq!(parsed["total_days"]["MicrosoftStack"], 225);
        assert_eq!(parsed["total_days"]["AzurePowerApps"], 165);
    }

    #[test]
    fn test_render_styled_chart() {
        console::set_colors_enabled(false);
        let out = render(&RenderContext::plain(OutputFormat::Auto)).unwrap();
        assert!(out.contains("225 days"));
        assert!(out.contains("165 days"));
        assert!(out.contains("Risk Levels"));
        assert!(out.contains("6 phase(s)"));
    }
}
