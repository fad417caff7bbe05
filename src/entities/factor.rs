//! Factor entity - scored comparison factors (0-10 per stack)

use serde::Serialize;

use crate::core::entity::{Entity, Stack};

/// Highest score a factor can receive
pub const MAX_SCORE: u8 = 10;

/// A single scoring factor with one score per stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FactorScore {
    #[serde(rename = "Factor")]
    pub factor: &'static str,

    #[serde(rename = "MicrosoftStack")]
    pub microsoft: u8,

    #[serde(rename = "AzurePowerApps")]
    pub power_apps: u8,
}

impl FactorScore {
    pub const fn new(factor: &'static str, microsoft: u8, power_apps: u8) -> Self {
        Self {
            factor,
            microsoft,
            power_apps,
        }
    }

    /// Signed score difference (Power Apps minus Microsoft Stack)
    pub fn difference(&self) -> i16 {
        i16::from(self.power_apps) - i16::from(self.microsoft)
    }
}

impl Entity for FactorScore {
    type Value = u8;
    const LABEL_HEADER: &'static str = "Factor";

    fn label(&self) -> &'static str {
        self.factor
    }

    fn value(&self, stack: Stack) -> u8 {
        match stack {
            Stack::Microsoft => self.microsoft,
            Stack::PowerApps => self.power_apps,
        }
    }
}
