//! `stackcmp features` - feature support comparison

use miette::Result;

use crate::cli::commands::utils::{heading, json_string, subheading, write_output};
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{OutputFormat, RenderContext};
use crate::core::dataset;
use crate::core::style::support_symbol;
use crate::entities::Support;

const NOTE_WRAP: usize = 40;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("Feature", "Feature", 25),
    ColumnDef::new("MicrosoftStack", "Microsoft Stack", 16),
    ColumnDef::new("AzurePowerApps", "Azure Power Apps", 17),
    ColumnDef::new("Notes", "Notes", 42),
];

pub fn run(ctx: &RenderContext) -> Result<()> {
    let out = render(ctx)?;
    write_output(&out, None, ctx.quiet)
}

pub fn render(ctx: &RenderContext) -> Result<String> {
    if ctx.format == OutputFormat::Json {
        return json_string(&to_json());
    }

    let mut out = heading(ctx, "Feature Comparison");
    out.push_str(&feature_table(ctx));

    if matches!(ctx.format, OutputFormat::Auto | OutputFormat::Md) {
        out.push('\n');
        out.push_str(&subheading(ctx, "Legend"));
        out.push_str(&support_legend());
    }
    Ok(out)
}

fn support_legend() -> String {
    let parts: Vec<String> = Support::ALL
        .iter()
        .map(|s| format!("{} - {}", support_symbol(*s), s.description()))
        .collect();
    format!("{}\n", parts.join("   "))
}

fn feature_table(ctx: &RenderContext) -> String {
    let rows: Vec<TableRow> = dataset::feature_rows()
        .iter()
        .map(|f| {
            TableRow::new()
                .cell("Feature", CellValue::Text(f.feature.to_string()))
                .cell("MicrosoftStack", CellValue::Support(f.microsoft))
                .cell("AzurePowerApps", CellValue::Support(f.power_apps))
                .cell("Notes", CellValue::Text(f.note.to_string()))
        })
        .collect();

    let config = if ctx.is_styled() {
        TableConfig::with_wrap(NOTE_WRAP)
    } else {
        TableConfig::for_pipe()
    };
    TableFormatter::new(COLUMNS, "feature")
        .with_config(config)
        .with_theme(ctx.theme)
        .render(&rows, ctx.format)
}

pub fn to_json() -> serde_json::Value {
    serde_json::json!(dataset::feature_rows())
}
