//! Shared utilities for CLI commands

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::cli::{OutputFormat, RenderContext};

/// Write rendered output to a file, or to stdout when no path is given
pub fn write_output(content: &str, output_path: Option<&Path>, quiet: bool) -> Result<()> {
    match output_path {
        Some(path) => {
            let file = File::create(path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            tracing::debug!(path = %path.display(), bytes = content.len(), "wrote output");
            if !quiet {
                eprintln!("{} Written to {}", style("✓").green(), style(path.display()).cyan());
            }
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Section heading for styled and Markdown output; empty for data formats
pub fn heading(ctx: &RenderContext, title: &str) -> String {
    match ctx.format {
        OutputFormat::Auto => format!("{}\n\n", style(title).bold().underlined()),
        OutputFormat::Md => format!("## {}\n\n", title),
        _ => String::new(),
    }
}

/// Sub-heading inside a section
pub fn subheading(ctx: &RenderContext, title: &str) -> String {
    match ctx.format {
        OutputFormat::Auto => format!("{}\n", style(title).bold()),
        OutputFormat::Md => format!("### {}\n\n", title),
        _ => String::new(),
    }
}

/// Pretty JSON followed by a newline
pub fn json_string(value: &serde_json::Value) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).into_diagnostic()?;
    out.push('\n');
    Ok(out)
}
