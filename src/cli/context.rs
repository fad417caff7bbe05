//! Per-invocation render settings
//!
//! Built once in `main` from the global flags and the loaded config, then
//! passed by reference into every view.

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::estimator::EstimatorInput;
use crate::core::style::{paint, Theme, Tone};
use crate::core::Config;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub format: OutputFormat,
    pub theme: Theme,
    /// Print the raw data table under each chart
    pub show_raw: bool,
    pub quiet: bool,
    /// Starting values for the ROI calculator
    pub defaults: EstimatorInput,
}

impl RenderContext {
    /// Flags win over config, config wins over built-in defaults
    pub fn new(global: &GlobalOpts, config: &Config) -> Self {
        let format = global.format.unwrap_or_else(|| {
            config
                .default_format
                .as_deref()
                .and_then(|f| match f.parse::<OutputFormat>() {
                    Ok(format) => Some(format),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring configured default_format");
                        None
                    }
                })
                .unwrap_or_default()
        });

        Self {
            format,
            theme: global.theme.unwrap_or_else(|| config.theme()),
            show_raw: !global.no_raw && config.show_raw(),
            quiet: global.quiet,
            defaults: config.estimator_defaults(),
        }
    }

    /// Default settings with the given output format
    pub fn plain(format: OutputFormat) -> Self {
        Self {
            format,
            theme: Theme::default(),
            show_raw: true,
            quiet: false,
            defaults: EstimatorInput::default(),
        }
    }

    pub fn paint(&self, text: &str, tone: Tone) -> String {
        paint(text, tone, self.theme)
    }

    /// True for the styled terminal format, where charts are drawn
    pub fn is_styled(&self) -> bool {
        self.format == OutputFormat::Auto
    }
}
