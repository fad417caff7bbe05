//! `stackcmp roi` - ROI calculator
//!
//! Inputs come from flags, fall back to configured defaults and can be
//! entered at prompts with `--interactive`. The calculator's input ranges
//! are enforced here, before the estimator runs.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::ops::RangeInclusive;

use crate::cli::commands::utils::{heading, json_string, subheading, write_output};
use crate::cli::helpers::format_currency;
use crate::cli::table::{CellValue, ColumnDef, TableConfig, TableFormatter, TableRow};
use crate::cli::{OutputFormat, RenderContext};
use crate::core::estimator::{estimate, ComplexityTier, EstimatorInput, EstimatorOutput};
use crate::core::Stack;

pub const USERS_RANGE: RangeInclusive<i64> = 10..=1000;
pub const MONTHS_RANGE: RangeInclusive<i64> = 6..=36;
pub const ROI_RANGE: RangeInclusive<f64> = 0.0..=200.0;

const COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("Stack", "Stack", 18),
    ColumnDef::new("TotalCost", "Total Cost", 18),
    ColumnDef::new("ExpectedROI", "Expected ROI", 18),
];

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RoiArgs {
    /// Number of users (10-1000) [default: 50]
    #[arg(long, value_parser = clap::value_parser!(i64).range(10..=1000))]
    pub users: Option<i64>,

    /// Project duration in months (6-36) [default: 12]
    #[arg(long, value_parser = clap::value_parser!(i64).range(6..=36))]
    pub months: Option<i64>,

    /// Project complexity [default: medium]
    #[arg(long, value_enum, ignore_case = true)]
    pub complexity: Option<ComplexityTier>,

    /// Expected ROI in percent (0-200) [default: 100]
    #[arg(long, value_parser = parse_roi_percent)]
    pub roi: Option<f64>,

    /// Prompt for each input
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

/// Parse an ROI percentage within the calculator's range
pub fn parse_roi_percent(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number", s))?;
    if !ROI_RANGE.contains(&value) {
        return Err(format!(
            "{} is not in {}..={}",
            value,
            ROI_RANGE.start(),
            ROI_RANGE.end()
        ));
    }
    Ok(value)
}

impl RoiArgs {
    /// Flags over configured defaults
    pub fn resolve(&self, defaults: &EstimatorInput) -> EstimatorInput {
        EstimatorInput {
            user_count: self.users.unwrap_or(defaults.user_count),
            duration_months: self.months.unwrap_or(defaults.duration_months),
            complexity: self.complexity.unwrap_or(defaults.complexity),
            target_roi_percent: self.roi.unwrap_or(defaults.target_roi_percent),
        }
    }
}

/// Reject values outside the calculator's input ranges.
///
/// Flags are range-checked by clap; this catches configured defaults.
pub fn check_ranges(input: &EstimatorInput) -> Result<()> {
    if !USERS_RANGE.contains(&input.user_count) {
        return Err(out_of_range("users", input.user_count, &USERS_RANGE));
    }
    if !MONTHS_RANGE.contains(&input.duration_months) {
        return Err(out_of_range("months", input.duration_months, &MONTHS_RANGE));
    }
    if !ROI_RANGE.contains(&input.target_roi_percent) {
        return Err(out_of_range("roi_percent", input.target_roi_percent, &ROI_RANGE));
    }
    Ok(())
}

fn out_of_range<T: std::fmt::Display>(
    key: &str,
    value: T,
    range: &RangeInclusive<T>,
) -> miette::Report {
    miette::miette!(
        code = "stackcmp::roi::out_of_range",
        help = format!("check `roi.{}` in your config (`stackcmp config show`)", key),
        "{} = {} is outside {}..={}",
        key,
        value,
        range.start(),
        range.end()
    )
}

pub fn run(args: RoiArgs, ctx: &RenderContext) -> Result<()> {
    let mut input = args.resolve(&ctx.defaults);
    check_ranges(&input)?;
    if args.interactive {
        input = prompt(input)?;
    }
    let out = render(&input, ctx)?;
    write_output(&out, None, ctx.quiet)
}

/// Ask for each input, starting from the resolved values
fn prompt(start: EstimatorInput) -> Result<EstimatorInput> {
    let theme = ColorfulTheme::default();

    let user_count: i64 = Input::with_theme(&theme)
        .with_prompt("Number of Users")
        .default(start.user_count)
        .validate_with(|v: &i64| range_check(v, &USERS_RANGE))
        .interact_text()
        .into_diagnostic()?;

    let duration_months: i64 = Input::with_theme(&theme)
        .with_prompt("Project Duration (Months)")
        .default(start.duration_months)
        .validate_with(|v: &i64| range_check(v, &MONTHS_RANGE))
        .interact_text()
        .into_diagnostic()?;

    let tiers: Vec<String> = ComplexityTier::ALL.iter().map(|t| t.to_string()).collect();
    let default_idx = ComplexityTier::ALL
        .iter()
        .position(|t| *t == start.complexity)
        .unwrap_or(1);
    let selection = Select::with_theme(&theme)
        .with_prompt("Project Complexity")
        .items(&tiers)
        .default(default_idx)
        .interact()
        .into_diagnostic()?;

    let target_roi_percent: f64 = Input::with_theme(&theme)
        .with_prompt("Expected ROI (%)")
        .default(start.target_roi_percent)
        .validate_with(|v: &f64| range_check(v, &ROI_RANGE))
        .interact_text()
        .into_diagnostic()?;

    Ok(EstimatorInput {
        user_count,
        duration_months,
        complexity: ComplexityTier::ALL
            .get(selection)
            .copied()
            .unwrap_or(start.complexity),
        target_roi_percent,
    })
}

fn range_check<T>(value: &T, range: &RangeInclusive<T>) -> std::result::Result<(), String>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(value) {
        Ok(())
    } else {
        Err(format!("must be between {} and {}", range.start(), range.end()))
    }
}

pub fn render(input: &EstimatorInput, ctx: &RenderContext) -> Result<String> {
    let output = estimate(input)?;

    if ctx.format == OutputFormat::Json {
        return json_string(&to_json(input, &output));
    }

    let mut out = heading(ctx, "ROI Calculator");
    match ctx.format {
        OutputFormat::Auto => {
            out.push_str(&subheading(ctx, "Input Parameters"));
            for (label, value) in input_lines(input) {
                out.push_str(&format!("  {:<28} {}\n", label, style(value).cyan()));
            }
            out.push('\n');
            out.push_str(&subheading(ctx, "ROI Analysis"));
            for (label, value) in metric_lines(&output) {
                out.push_str(&format!("  {:<32} {}\n", label, style(value).bold()));
            }
        }
        OutputFormat::Md => {
            out.push_str(&subheading(ctx, "Input Parameters"));
            for (label, value) in input_lines(input) {
                out.push_str(&format!("- **{}:** {}\n", label, value));
            }
            out.push('\n');
            out.push_str(&subheading(ctx, "ROI Analysis"));
            for (label, value) in metric_lines(&output) {
                out.push_str(&format!("- **{}:** {}\n", label, value));
            }
        }
        _ => out.push_str(&metric_table(&output, ctx)),
    }
    Ok(out)
}

fn input_lines(input: &EstimatorInput) -> Vec<(&'static str, String)> {
    vec![
        ("Number of Users", input.user_count.to_string()),
        ("Project Duration (Months)", input.duration_months.to_string()),
        ("Project Complexity", input.complexity.to_string()),
        ("Expected ROI (%)", input.target_roi_percent.to_string()),
    ]
}

/// The four output metrics, costs first
fn metric_lines(output: &EstimatorOutput) -> Vec<(String, String)> {
    let costs = Stack::ALL.iter().map(|s| {
        (
            format!("{} Total Cost", s.display_name()),
            format_currency(output.cost(*s)),
        )
    });
    let returns = Stack::ALL.iter().map(|s| {
        (
            format!("{} Expected ROI", s.display_name()),
            format_currency(output.roi(*s)),
        )
    });
    costs.chain(returns).collect()
}

fn metric_table(output: &EstimatorOutput, ctx: &RenderContext) -> String {
    let rows: Vec<TableRow> = Stack::ALL
        .iter()
        .map(|s| {
            TableRow::new()
                .cell("Stack", CellValue::Text(s.column().to_string()))
                .cell("TotalCost", CellValue::Currency(output.cost(*s)))
                .cell("ExpectedROI", CellValue::Currency(output.roi(*s)))
        })
        .collect();
    TableFormatter::new(COLUMNS, "stack")
        .with_config(TableConfig::for_pipe())
        .with_theme(ctx.theme)
        .render(&rows, ctx.format)
}

pub fn to_json(input: &EstimatorInput, output: &EstimatorOutput) -> serde_json::Value {
    serde_json::json!({
        "input": input,
        "output": output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roi_percent() {
        assert_eq!(parse_roi_percent("0").unwrap(), 0.0);
        assert_eq!(parse_roi_percent(" 150.5 ").unwrap(), 150.5);
        assert_eq!(parse_roi_percent("200").unwrap(), 200.0);
        assert!(parse_roi_percent("200.1").is_err());
        assert!(parse_roi_percent("-1").is_err());
        assert!(parse_roi_percent("NaN").is_err());
        assert!(parse_roi_percent("lots").is_err());
    }

    #[test]
    fn test_resolve_prefers_flags() {
        let defaults = EstimatorInput::new(200, 24, ComplexityTier::High, 50.0);
        let args = RoiArgs {
            users: Some(10),
            complexity: Some(ComplexityTier::Low),
            ..Default::default()
        };
        let input = args.resolve(&defaults);
        assert_eq!(input, EstimatorInput::new(10, 24, ComplexityTier::Low, 50.0));
    }

    #[test]
    fn test_check_ranges() {
        assert!(check_ranges(&EstimatorInput::default()).is_ok());
        assert!(check_ranges(&EstimatorInput::new(10, 6, ComplexityTier::Low, 0.0)).is_ok());
        assert!(check_ranges(&EstimatorInput::new(1000, 36, ComplexityTier::High, 200.0)).is_ok());
        assert!(check_ranges(&EstimatorInput::new(5, 12, ComplexityTier::Medium, 100.0)).is_err());
        assert!(check_ranges(&EstimatorInput::new(50, 48, ComplexityTier::Medium, 100.0)).is_err());
        assert!(check_ranges(&EstimatorInput::new(50, 12, ComplexityTier::Medium, 250.0)).is_err());
    }

    #[test]
    fn test_render_md_defaults() {
        let out = render(&EstimatorInput::default(), &RenderContext::plain(OutputFormat::Md))
            .unwrap();
        assert!(out.contains("- **Microsoft Stack Total Cost:** $110,000.00"));
        assert!(out.contains("- **Azure Power Apps Total Cost:** $54,000.00"));
        assert!(out.contains("- **Microsoft Stack Expected ROI:** $110,000.00"));
        assert!(out.contains("- **Azure Power Apps Expected ROI:** $54,000.00"));
    }

    #[test]
    fn test_render_csv_upper_boundary() {
        let input = EstimatorInput::new(1000, 36, ComplexityTier::High, 200.0);
        let out = render(&input, &RenderContext::plain(OutputFormat::Csv)).unwrap();
        assert_eq!(
            out,
            "Stack,TotalCost,ExpectedROI\n\
             MicrosoftStack,4745000.00,9490000.00\n\
             AzurePowerApps,1911000.00,3822000.00\n"
        );
    }

    #[test]
    fn test_render_json() {
        let input = EstimatorInput::new(10, 6, ComplexityTier::Low, 0.0);
        let out = render(&input, &RenderContext::plain(OutputFormat::Json)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["input"]["complexity"], "low");
        assert_eq!(parsed["output"]["cost_a"], 44800.0);
        assert_eq!(parsed["output"]["cost_b"], 25920.0);
        assert_eq!(parsed["output"]["roi_a"], 0.0);
    }

    #[test]
    fn test_render_rejects_invalid_input() {
        let input = EstimatorInput::new(0, 12, ComplexityTier::Medium, 100.0);
        assert!(render(&input, &RenderContext::plain(OutputFormat::Auto)).is_err());
    }
}
