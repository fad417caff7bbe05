//! Cost entity - cost categories in whole US dollars

use serde::Serialize;

use crate::core::entity::{Entity, Stack};

/// A cost category with an amount for each stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostItem {
    #[serde(rename = "Category")]
    pub category: &'static str,

    #[serde(rename = "MicrosoftStack")]
    pub microsoft: u32,

    #[serde(rename = "AzurePowerApps")]
    pub power_apps: u32,
}

impl CostItem {
    pub const fn new(category: &'static str, microsoft: u32, power_apps: u32) -> Self {
        Self {
            category,
            microsoft,
            power_apps,
        }
    }
}

impl Entity for CostItem {
    type Value = u32;
    const LABEL_HEADER: &'static str = "Category";

    fn label(&self) -> &'static str {
        self.category
    }

    fn value(&self, stack: Stack) -> u32 {
        match stack {
            Stack::Microsoft => self.microsoft,
            Stack::PowerApps => self.power_apps,
        }
    }
}
