//! Feature entity - platform capability support

use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Stack};

/// How well a stack supports a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Support {
    Full,
    Partial,
    #[serde(rename = "None")]
    Unsupported,
}

impl Support {
    pub const ALL: [Support; 3] = [Support::Full, Support::Partial, Support::Unsupported];

    /// Legend text shown next to each symbol
    pub fn description(&self) -> &'static str {
        match self {
            Support::Full => "Full Support",
            Support::Partial => "Partial/Limited Support",
            Support::Unsupported => "Not Supported",
        }
    }
}

impl std::fmt::Display for Support {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Support::Full => write!(f, "Full"),
            Support::Partial => write!(f, "Partial"),
            Support::Unsupported => write!(f, "None"),
        }
    }
}

impl std::str::FromStr for Support {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Support::Full),
            "partial" => Ok(Support::Partial),
            "none" => Ok(Support::Unsupported),
            _ => Err(format!("Unknown support level: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for Support {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A platform feature with per-stack support and a short note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureRow {
    #[serde(rename = "Feature")]
    pub feature: &'static str,

    #[serde(rename = "MicrosoftStack")]
    pub microsoft: Support,

    #[serde(rename = "AzurePowerApps")]
    pub power_apps: Support,

    #[serde(rename = "Notes")]
    pub note: &'static str,
}

impl FeatureRow {
    pub const fn new(
        feature: &'static str,
        microsoft: Support,
        power_apps: Support,
        note: &'static str,
    ) -> Self {
        Self {
            feature,
            microsoft,
            power_apps,
            note,
        }
    }
}

impl Entity for FeatureRow {
    type Value = Support;
    const LABEL_HEADER: &'static str = "Feature";

    fn label(&self) -> &'static str {
        self.feature
    }

    fn value(&self, stack: Stack) -> Support {
        match stack {
            Stack::Microsoft => self.microsoft,
            Stack::PowerApps => self.power_apps,
        }
    }
}
