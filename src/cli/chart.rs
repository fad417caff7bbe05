//! Terminal charts drawn with block characters
//!
//! Charts are plain strings so views can assemble them before writing.

use console::{measure_text_width, pad_str, Alignment};

use crate::core::style::{paint, Theme, Tone};

const BLOCK: char = '█';
const LEGEND_MARK: &str = "■";

/// Number of cells a value occupies on a `width`-cell axis ending at `max`
pub fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let ratio = (value / max).min(1.0);
    (ratio * width as f64).round() as usize
}

/// A single horizontal bar
pub fn bar(value: f64, max: f64, width: usize, tone: Tone, theme: Theme) -> String {
    let cells = bar_len(value, max, width);
    paint(&BLOCK.to_string().repeat(cells), tone, theme)
}

/// One labelled series inside a grouped bar chart
pub struct Series<'a> {
    pub name: &'a str,
    pub tone: Tone,
    pub values: Vec<f64>,
}

/// Grouped horizontal bars: one block per category, one bar per series.
///
/// `max` is the value drawn at full `width`. `value_label` formats the
/// number printed after each bar.
pub fn grouped_bars(
    categories: &[&str],
    series: &[Series<'_>],
    max: f64,
    width: usize,
    theme: Theme,
    value_label: impl Fn(f64) -> String,
) -> String {
    let label_width = categories
        .iter()
        .map(|c| measure_text_width(c))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (idx, category) in categories.iter().enumerate() {
        for (n, s) in series.iter().enumerate() {
            let value = s.values.get(idx).copied().unwrap_or(0.0);
            let label = if n == 0 { *category } else { "" };
            out.push_str(&format!(
                "{} {} {}\n",
                pad_str(label, label_width, Alignment::Left, None),
                bar(value, max, width, s.tone, theme),
                value_label(value)
            ));
        }
    }
    out
}

/// Cell widths for consecutive segments laid end to end.
///
/// Rounds cumulative positions rather than each segment so the widths
/// always add up to the rounded total.
pub fn segment_widths(values: &[u32], max: f64, width: usize) -> Vec<usize> {
    let mut widths = Vec::with_capacity(values.len());
    let mut running = 0u64;
    let mut drawn = 0usize;
    for v in values {
        running += u64::from(*v);
        let end = bar_len(running as f64, max, width);
        widths.push(end.saturating_sub(drawn));
        drawn = end.max(drawn);
    }
    widths
}

/// A stacked horizontal bar with one colored segment per value
pub fn stacked_bar(segments: &[(u32, Tone)], max: f64, width: usize, theme: Theme) -> String {
    let values: Vec<u32> = segments.iter().map(|(v, _)| *v).collect();
    segment_widths(&values, max, width)
        .into_iter()
        .zip(segments)
        .map(|(cells, (_, tone))| paint(&BLOCK.to_string().repeat(cells), *tone, theme))
        .collect()
}

/// A one-line legend: `■ Microsoft Stack  ■ Azure Power Apps`
pub fn legend(items: &[(&str, Tone)], theme: Theme) -> String {
    let parts: Vec<String> = items
        .iter()
        .map(|(name, tone)| format!("{} {}", paint(LEGEND_MARK, *tone, theme), name))
        .collect();
    format!("{}\n", parts.join("  "))
}
