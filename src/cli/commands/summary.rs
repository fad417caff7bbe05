//! `stackcmp summary` - key findings and recommended approach

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::{heading, json_string, subheading, write_output};
use crate::cli::helpers::{csv_records, format_dollars};
use crate::cli::{OutputFormat, RenderContext};
use crate::core::dataset;
use crate::core::style::stack_tone;
use crate::core::{Entity, Stack};
use crate::entities::Support;

struct Finding {
    icon: &'static str,
    title: &'static str,
    points: [&'static str; 2],
}

const FINDINGS: [Finding; 4] = [
    Finding {
        icon: "🚀",
        title: "Development Speed",
        points: [
            "Azure Power Apps shows significant advantages in rapid development",
            "Faster time-to-market by approximately 30%",
        ],
    },
    Finding {
        icon: "💰",
        title: "Cost Structure",
        points: [
            "Initial costs vary by implementation scope",
            "Long-term TCO generally favors Azure Power Apps",
        ],
    },
    Finding {
        icon: "📈",
        title: "Scalability",
        points: [
            "Azure Power Apps provides better built-in scalability",
            "Lower infrastructure management overhead",
        ],
    },
    Finding {
        icon: "🛠️",
        title: "Customization",
        points: [
            "Traditional Microsoft Stack offers more flexibility",
            "Better suited for complex custom requirements",
        ],
    },
];

/// Workloads each stack is recommended for
const RECOMMENDED: [(Stack, [&str; 5]); 2] = [
    (
        Stack::PowerApps,
        [
            "Standard workflows",
            "User interfaces",
            "Basic business processes",
            "Mobile access requirements",
            "Rapid prototyping needs",
        ],
    ),
    (
        Stack::Microsoft,
        [
            "Complex calculations",
            "Custom integrations",
            "Performance-critical operations",
            "Legacy system interfaces",
            "Specialized security requirements",
        ],
    ),
];

fn focus_title(stack: Stack) -> String {
    match stack {
        Stack::Microsoft => "Traditional Microsoft Stack Focus".to_string(),
        Stack::PowerApps => format!("{} Focus", stack.display_name()),
    }
}

/// Headline numbers derived from the dataset, one value per stack
fn key_metrics() -> Vec<(&'static str, [String; 2])> {
    let per_stack = |f: &dyn Fn(Stack) -> String| [f(Stack::Microsoft), f(Stack::PowerApps)];
    vec![
        (
            "Total Cost",
            per_stack(&|s| format_dollars(dataset::total_cost(s) as i64)),
        ),
        (
            "Implementation Time",
            per_stack(&|s| format!("{} days", dataset::total_duration(s))),
        ),
        (
            "Average Factor Score",
            per_stack(&|s| format!("{:.1}", average_score(s))),
        ),
        (
            "Fully Supported Features",
            per_stack(&|s| {
                let full = dataset::feature_rows()
                    .iter()
                    .filter(|f| f.value(s) == Support::Full)
                    .count();
                format!("{}/{}", full, dataset::feature_rows().len())
            }),
        ),
    ]
}

fn average_score(stack: Stack) -> f64 {
    let scores = dataset::factor_scores();
    if scores.is_empty() {
        return 0.0;
    }
    let sum: u32 = scores.iter().map(|f| u32::from(f.value(stack))).sum();
    f64::from(sum) / scores.len() as f64
}

pub fn run(ctx: &RenderContext) -> Result<()> {
    let out = render(ctx)?;
    write_output(&out, None, ctx.quiet)
}

pub fn render(ctx: &RenderContext) -> Result<String> {
    match ctx.format {
        OutputFormat::Json => json_string(&to_json()),
        OutputFormat::Csv => Ok(metrics_csv()),
        _ => Ok(render_text(ctx)),
    }
}

fn render_text(ctx: &RenderContext) -> String {
    let md = ctx.format == OutputFormat::Md;
    let mut out = heading(ctx, "📋 Analysis Summary & Recommendations");

    out.push_str(&subheading(ctx, "Key Metrics"));
    out.push_str(&metrics_table(ctx.format));
    out.push_str("\n\n");

    out.push_str(&subheading(ctx, "Key Findings"));
    for (n, finding) in FINDINGS.iter().enumerate() {
        let title = if md {
            format!("**{}**", finding.title)
        } else {
            style(finding.title).bold().to_string()
        };
        out.push_str(&format!("{}. {} {}\n", n + 1, finding.icon, title));
        for point in finding.points {
            out.push_str(&format!("   - {}\n", point));
        }
    }
    out.push('\n');

    out.push_str(&subheading(ctx, "Recommended Approach"));
    for (stack, workloads) in RECOMMENDED {
        let title = focus_title(stack);
        if md {
            out.push_str(&format!("#### {}:\n\n", title));
        } else {
            out.push_str(&format!("{}\n", ctx.paint(&format!("{}:", title), stack_tone(stack))));
        }
        for item in workloads {
            out.push_str(&format!("- {}\n", item));
        }
        out.push('\n');
    }
    out
}

fn metrics_table(format: OutputFormat) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "Metric",
        Stack::Microsoft.display_name(),
        Stack::PowerApps.display_name(),
    ]);
    for (label, [a, b]) in key_metrics() {
        builder.push_record([label.to_string(), a, b]);
    }
    let mut table = builder.build();
    match format {
        OutputFormat::Md => table.with(Style::markdown()),
        OutputFormat::Tsv => table.with(Style::blank()),
        _ => table.with(Style::rounded()),
    };
    table.to_string()
}

fn metrics_csv() -> String {
    let header = vec![
        "Metric".to_string(),
        Stack::Microsoft.column().to_string(),
        Stack::PowerApps.column().to_string(),
    ];
    let body = key_metrics()
        .into_iter()
        .map(|(label, [a, b])| vec![label.to_string(), a, b]);
    csv_records(std::iter::once(header).chain(body))
}

pub fn to_json() -> serde_json::Value {
    let findings: Vec<serde_json::Value> = FINDINGS
        .iter()
        .map(|f| serde_json::json!({ "title": f.title, "points": f.points }))
        .collect();
    let recommended: serde_json::Map<String, serde_json::Value> = RECOMMENDED
        .iter()
        .map(|(stack, items)| (stack.column().to_string(), serde_json::json!(items)))
        .collect();
    let metrics: serde_json::Map<String, serde_json::Value> = key_metrics()
        .into_iter()
        .map(|(label, values)| {
            let per_stack: serde_json::Map<String, serde_json::Value> = Stack::ALL
                .iter()
                .zip(values)
                .map(|(stack, v)| (stack.column().to_string(), serde_json::Value::from(v)))
                .collect();
            (label.to_string(), serde_json::Value::Object(per_stack))
        })
        .collect();
    serde_json::json!({
        "metrics": metrics,
        "findings": findings,
        "recommended": recommended,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_score() {
        assert!((average_score(Stack::Microsoft) - 7.5).abs() < 1e-9);
        assert!((average_score(Stack::PowerApps) - 7.8).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_csv() {
        let out = metrics_csv();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Metric,MicrosoftStack,AzurePowerApps");
        assert_eq!(lines[1], "Total Cost,\"$205,000\",\"$190,000\"");
        assert_eq!(lines[2], "Implementation Time,225 days,165 days");
        assert_eq!(lines[4], "Fully Supported Features,9/10,9/10");
    }

    #[test]
    fn test_render_md() {
        let out = render(&RenderContext::plain(OutputFormat::Md)).unwrap();
        assert!(out.contains("### Key Findings"));
        assert!(out.contains("1. 🚀 **Development Speed**"));
        assert!(out.contains("   - Faster time-to-market by approximately 30%"));
        assert!(out.contains("#### Azure Power Apps Focus:"));
        assert!(out.contains("#### Traditional Microsoft Stack Focus:"));
        assert!(out.contains("- Legacy system interfaces"));
        assert!(out.contains("| Implementation Time"));
    }

    #[test]
    fn test_render_json() {
        let out = render(&RenderContext::plain(OutputFormat::Json)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["findings"].as_array().unwrap().len(), 4);
        assert_eq!(parsed["recommended"]["AzurePowerApps"][0], "Standard workflows");
        assert_eq!(parsed["metrics"]["Total Cost"]["MicrosoftStack"], "$205,000");
    }
}
