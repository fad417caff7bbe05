//! `stackcmp dashboard` - every section in tab order

use miette::Result;

use crate::cli::commands::utils::{json_string, write_output};
use crate::cli::commands::{costs, factors, features, roi, summary, timeline};
use crate::cli::{OutputFormat, RenderContext};
use crate::core::estimator::estimate;

pub fn run(ctx: &RenderContext) -> Result<()> {
    let out = render(ctx)?;
    write_output(&out, None, ctx.quiet)
}

pub fn render(ctx: &RenderContext) -> Result<String> {
    roi::check_ranges(&ctx.defaults)?;
    let factor_args = factors::FactorsArgs::default();

    match ctx.format {
        OutputFormat::Csv | OutputFormat::Tsv => Err(miette::miette!(
            help = "use `stackcmp export all` for CSV files, or pass a single view such as `stackcmp costs --format csv`",
            "The dashboard combines several tables and has no {} form",
            if ctx.format == OutputFormat::Csv { "CSV" } else { "TSV" }
        )),
        OutputFormat::Json => {
            let output = estimate(&ctx.defaults)?;
            json_string(&serde_json::json!({
                "factors": factors::to_json(&factor_args),
                "timeline": timeline::to_json(),
                "costs": costs::to_json(),
                "features": features::to_json(),
                "roi": roi::to_json(&ctx.defaults, &output),
                "summary": summary::to_json(),
            }))
        }
        OutputFormat::Auto | OutputFormat::Md => {
            let mut title = String::from("Microsoft Stack vs Azure Power Apps");
            let sections = [
                factors::render(&factor_args, ctx)?,
                timeline::render(ctx)?,
                costs::render(ctx)?,
                features::render(ctx)?,
                roi::render(&ctx.defaults, ctx)?,
                summary::render(ctx)?,
            ];
            let (prefix, rule) = if ctx.format == OutputFormat::Md {
                ("# ", "\n---\n\n")
            } else {
                title = console::style(title).bold().cyan().to_string();
                ("", "\n")
            };
            let mut out = format!("{}{}\n\n", prefix, title);
            out.push_str(&sections.join(rule));
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_md_has_every_section_in_order() {
        let out = render(&RenderContext::plain(OutputFormat::Md)).unwrap();
        let order = [
            "## Comprehensive Comparison Matrix",
            "## Implementation Timeline Analysis",
            "## Detailed Cost Analysis",
            "## Feature Comparison",
            "## ROI Calculator",
            "## 📋 Analysis Summary & Recommendations",
        ];
        let positions: Vec<usize> = order.iter().map(|h| out.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(out.starts_with("# Microsoft Stack vs Azure Power Apps"));
    }

    #[test]
    fn test_render_json_sections() {
        let out = render(&RenderContext::plain(OutputFormat::Json)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        for key in ["factors", "timeline", "costs", "features", "roi", "summary"] {
            assert!(parsed.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(parsed["roi"]["output"]["cost_a"], 110000.0);
    }

    #[test]
    fn test_render_csv_is_rejected() {
        assert!(render(&RenderContext::plain(OutputFormat::Csv)).is_err());
        assert!(render(&RenderContext::plain(OutputFormat::Tsv)).is_err());
    }

    #[test]
    fn test_out_of_range_defaults_rejected() {
        let mut ctx = RenderContext::plain(OutputFormat::Md);
        ctx.defaults.user_count = 5;
        assert!(render(&ctx).is_err());
    }
}
