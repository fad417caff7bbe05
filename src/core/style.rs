//! Presentation annotations
//!
//! Pure mappings from values to presentation tags. Nothing here is stored;
//! renderers ask for a [`Tone`] when they draw a cell and paint it with the
//! active [`Theme`].

use clap::ValueEnum;
use console::Style;
use serde::{Deserialize, Serialize};

use crate::core::entity::Stack;
use crate::entities::{RiskLevel, Support};

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A color tag attached to a rendered value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Red,
    Orange,
    Yellow,
    LightGreen,
    Green,
    Blue,
    Neutral,
}

/// Closed value range used to normalize a value before picking a tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
}

impl Scale {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` within the scale, clamped to [0, 1]
    pub fn position(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !value.is_finite() {
            return 0.5;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Scale for factor score differences (Power Apps minus Microsoft Stack)
pub const DIFFERENCE_SCALE: Scale = Scale::new(-5.0, 5.0);

/// Red-yellow-green diverging tone: low values red, high values green
pub fn diverging_tone(value: f64, scale: Scale) -> Tone {
    let t = scale.position(value);
    if t < 0.2 {
        Tone::Red
    } else if t < 0.4 {
        Tone::Orange
    } else if t < 0.6 {
        Tone::Yellow
    } else if t < 0.8 {
        Tone::LightGreen
    } else {
        Tone::Green
    }
}

pub fn risk_tone(level: RiskLevel) -> Tone {
    match level {
        RiskLevel::Low => Tone::Green,
        RiskLevel::Medium => Tone::Orange,
        RiskLevel::High => Tone::Red,
    }
}

/// Series color for each stack in charts
pub fn stack_tone(stack: Stack) -> Tone {
    match stack {
        Stack::Microsoft => Tone::Blue,
        Stack::PowerApps => Tone::Orange,
    }
}

pub fn support_symbol(support: Support) -> &'static str {
    match support {
        Support::Full => "✅",
        Support::Partial => "⚠️",
        Support::Unsupported => "❌",
    }
}

pub fn risk_symbol(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "🟢",
        RiskLevel::Medium => "🟡",
        RiskLevel::High => "🔴",
    }
}

/// Build the console style for a tone under the given theme
pub fn tone_style(tone: Tone, theme: Theme) -> Style {
    let base = match tone {
        Tone::Red => Style::new().red(),
        Tone::Orange => Style::new().color256(208),
        Tone::Yellow => Style::new().yellow(),
        Tone::LightGreen => Style::new().color256(114),
        Tone::Green => Style::new().green(),
        Tone::Blue => Style::new().color256(32),
        Tone::Neutral => match theme {
            Theme::Light => Style::new(),
            Theme::Dark => Style::new().white(),
        },
    };
    match (theme, tone) {
        (Theme::Dark, Tone::Red | Tone::Yellow | Tone::Green) => base.bright(),
        _ => base,
    }
}

/// Paint text with a tone (no-op when colors are disabled)
pub fn paint(text: &str, tone: Tone, theme: Theme) -> String {
    tone_style(tone, theme).apply_to(text).to_string()
}
