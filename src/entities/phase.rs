//! Timeline phase entity - implementation phases with durations and risk

use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Stack};

/// Risk level attached to an implementation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An implementation phase with a duration (in days) for each stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelinePhase {
    #[serde(rename = "Phase")]
    pub phase: &'static str,

    #[serde(rename = "MicrosoftStack")]
    pub microsoft_days: u32,

    #[serde(rename = "AzurePowerApps")]
    pub power_apps_days: u32,

    #[serde(rename = "RiskLevel")]
    pub risk: RiskLevel,
}

impl TimelinePhase {
    pub const fn new(
        phase: &'static str,
        microsoft_days: u32,
        power_apps_days: u32,
        risk: RiskLevel,
    ) -> Self {
        Self {
            phase,
            microsoft_days,
            power_apps_days,
            risk,
        }
    }
}

impl Entity for TimelinePhase {
    type Value = u32;
    const LABEL_HEADER: &'static str = "Phase";

    fn label(&self) -> &'static str {
        self.phase
    }

    fn value(&self, stack: Stack) -> u32 {
        match stack {
            Stack::Microsoft => self.microsoft_days,
            Stack::PowerApps => self.power_apps_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_parse_is_case_insensitive() {
        assert_eq!("low".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
        assert_eq!("MEDIUM".parse::<RiskLevel>().unwrap(), RiskLevel::Medium);
        assert_eq!("High".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("critical".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_risk_level_display_roundtrips() {
        for level in RiskLevel::ALL {
            assert_eq!(level.to_string().parse::<RiskLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_value_per_stack() {
        let phase = TimelinePhase::new("Integration", 45, 30, RiskLevel::High);
        assert_eq!(phase.value(Stack::Microsoft), 45);
        assert_eq!(phase.value(Stack::PowerApps), 30);
        assert_eq!(phase.label(), "Integration");
    }
}
