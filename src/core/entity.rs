//! Entity trait - common interface for all comparison rows

use serde::{Deserialize, Serialize};

/// Common trait for rows that compare one value across both stacks
pub trait Entity {
    /// Per-stack value type (score, days, dollars, support level)
    type Value: Copy;

    /// Column header for the row label in exports (e.g., "Factor", "Phase")
    const LABEL_HEADER: &'static str;

    /// Get the row label (factor, phase, category or feature name)
    fn label(&self) -> &'static str;

    /// Get the value recorded for one stack
    fn value(&self, stack: Stack) -> Self::Value;
}

/// The two technology stacks under comparison
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Stack {
    /// Traditional platform stack (stack A)
    #[serde(rename = "MicrosoftStack")]
    Microsoft,
    /// Low-code platform (stack B)
    #[serde(rename = "AzurePowerApps")]
    PowerApps,
}

impl Stack {
    /// Both stacks in display order
    pub const ALL: [Stack; 2] = [Stack::Microsoft, Stack::PowerApps];

    /// Human-readable name used in headings and metrics
    pub fn display_name(&self) -> &'static str {
        match self {
            Stack::Microsoft => "Microsoft Stack",
            Stack::PowerApps => "Azure Power Apps",
        }
    }

    /// Column name used in CSV and JSON schemas
    pub const fn column(&self) -> &'static str {
        match self {
            Stack::Microsoft => "MicrosoftStack",
            Stack::PowerApps => "AzurePowerApps",
        }
    }

    /// The stack on the other side of the comparison
    pub fn other(&self) -> Stack {
        match self {
            Stack::Microsoft => Stack::PowerApps,
            Stack::PowerApps => Stack::Microsoft,
        }
    }
}

impl std::fmt::Display for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
