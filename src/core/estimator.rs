//! ROI estimator
//!
//! Scales a fixed base cost per stack by user count, project duration and a
//! complexity multiplier, then derives the expected return from a target ROI
//! percentage:
//!
//! ```text
//! cost_a = (users * 100 * months + 50000) * factor
//! cost_b = (users * 40  * months + 30000) * factor
//! roi_x  = cost_x * (roi_percent / 100)
//! ```
//!
//! The return is gross (`cost * percent`), not net of cost.

use clap::ValueEnum;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::entity::Stack;

/// Per user-month rate and fixed base cost for each stack
const MICROSOFT_RATE: i64 = 100;
const MICROSOFT_BASE: i64 = 50_000;
const POWER_APPS_RATE: i64 = 40;
const POWER_APPS_BASE: i64 = 30_000;

/// Errors raised for inputs outside the estimator's domain
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum EstimatorError {
    #[error("Invalid {field}: {reason}")]
    #[diagnostic(
        code(stackcmp::estimator::invalid_input),
        help("users and months must be positive, ROI must be a non-negative number, complexity one of low, medium, high")
    )]
    InvalidInput { field: &'static str, reason: String },
}

impl EstimatorError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EstimatorError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Project complexity tier, applied uniformly to both stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityTier {
    Low,
    #[default]
    Medium,
    High,
}

impl ComplexityTier {
    pub const ALL: [ComplexityTier; 3] = [
        ComplexityTier::Low,
        ComplexityTier::Medium,
        ComplexityTier::High,
    ];

    /// Lowercase key, as written to config files
    pub const fn key(self) -> &'static str {
        match self {
            ComplexityTier::Low => "low",
            ComplexityTier::Medium => "medium",
            ComplexityTier::High => "high",
        }
    }

    /// Cost multiplier for this tier
    pub const fn factor(self) -> f64 {
        match self {
            ComplexityTier::Low => 0.8,
            ComplexityTier::Medium => 1.0,
            ComplexityTier::High => 1.3,
        }
    }
}

impl std::fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplexityTier::Low => write!(f, "Low"),
            ComplexityTier::Medium => write!(f, "Medium"),
            ComplexityTier::High => write!(f, "High"),
        }
    }
}

impl std::str::FromStr for ComplexityTier {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(ComplexityTier::Low),
            "medium" => Ok(ComplexityTier::Medium),
            "high" => Ok(ComplexityTier::High),
            _ => Err(EstimatorError::invalid(
                "complexity",
                format!("unknown tier '{}'", s),
            )),
        }
    }
}

impl<'de> Deserialize<'de> for ComplexityTier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Estimator parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorInput {
    pub user_count: i64,
    pub duration_months: i64,
    pub complexity: ComplexityTier,
    pub target_roi_percent: f64,
}

impl Default for EstimatorInput {
    fn default() -> Self {
        Self {
            user_count: 50,
            duration_months: 12,
            complexity: ComplexityTier::Medium,
            target_roi_percent: 100.0,
        }
    }
}

impl EstimatorInput {
    pub fn new(
        user_count: i64,
        duration_months: i64,
        complexity: ComplexityTier,
        target_roi_percent: f64,
    ) -> Self {
        Self {
            user_count,
            duration_months,
            complexity,
            target_roi_percent,
        }
    }

    /// Check every field against the estimator's domain
    pub fn validate(&self) -> Result<(), EstimatorError> {
        if self.user_count <= 0 {
            return Err(EstimatorError::invalid(
                "user count",
                format!("must be positive, got {}", self.user_count),
            ));
        }
        if self.duration_months <= 0 {
            return Err(EstimatorError::invalid(
                "duration",
                format!("must be positive, got {} months", self.duration_months),
            ));
        }
        if !self.target_roi_percent.is_finite() || self.target_roi_percent < 0.0 {
            return Err(EstimatorError::invalid(
                "target ROI",
                format!("must be a non-negative number, got {}", self.target_roi_percent),
            ));
        }
        Ok(())
    }
}

/// Estimated total cost and expected return for both stacks
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimatorOutput {
    pub cost_a: f64,
    pub cost_b: f64,
    pub roi_a: f64,
    pub roi_b: f64,
}

impl EstimatorOutput {
    pub fn cost(&self, stack: Stack) -> f64 {
        match stack {
            Stack::Microsoft => self.cost_a,
            Stack::PowerApps => self.cost_b,
        }
    }

    pub fn roi(&self, stack: Stack) -> f64 {
        match stack {
            Stack::Microsoft => self.roi_a,
            Stack::PowerApps => self.roi_b,
        }
    }
}

/// Run the estimator. Fails only with [`EstimatorError::InvalidInput`].
pub fn estimate(input: &EstimatorInput) -> Result<EstimatorOutput, EstimatorError> {
    input.validate()?;

    let factor = input.complexity.factor();
    let cost_a = stack_cost(input, MICROSOFT_RATE, MICROSOFT_BASE)? * factor;
    let cost_b = stack_cost(input, POWER_APPS_RATE, POWER_APPS_BASE)? * factor;

    let share = input.target_roi_percent / 100.0;
    let output = EstimatorOutput {
        cost_a,
        cost_b,
        roi_a: cost_a * share,
        roi_b: cost_b * share,
    };

    tracing::debug!(
        users = input.user_count,
        months = input.duration_months,
        complexity = %input.complexity,
        roi_percent = input.target_roi_percent,
        cost_a = output.cost_a,
        cost_b = output.cost_b,
        "estimated costs"
    );

    Ok(output)
}

/// Unscaled cost, `users * rate * months + base`, in exact integer arithmetic
fn stack_cost(input: &EstimatorInput, rate: i64, base: i64) -> Result<f64, EstimatorError> {
    input
        .user_count
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(input.duration_months))
        .and_then(|v| v.checked_add(base))
        .map(|v| v as f64)
        .ok_or_else(|| EstimatorError::invalid("user count", "cost exceeds supported range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        if b == 0.0 {
            a == 0.0
        } else {
            ((a - b) / b).abs() <= 1e-9
        }
    }

    #[test]
    fn test_defaults() {
        let out = estimate(&EstimatorInput::default()).unwrap();
        // (50 * 100 * 12 + 50000) * 1.0
        assert_eq!(out.cost_a, 110_000.0);
        // (50 * 40 * 12 + 30000) * 1.0
        assert_eq!(out.cost_b, 54_000.0);
        assert_eq!(out.roi_a, 110_000.0);
        assert_eq!(out.roi_b, 54_000.0);
    }

    #[test]
    fn test_lower_boundary() {
        let input = EstimatorInput::new(10, 6, ComplexityTier::Low, 0.0);
        let out = estimate(&input).unwrap();
        assert!(close(out.cost_a, 44_800.0), "cost_a = {}", out.cost_a);
        assert!(close(out.cost_b, 25_920.0), "cost_b = {}", out.cost_b);
        assert_eq!(out.roi_a, 0.0);
        assert_eq!(out.roi_b, 0.0);
    }

    #[test]
    fn test_upper_boundary() {
        let input = EstimatorInput::new(1000, 36, ComplexityTier::High, 200.0);
        let out = estimate(&input).unwrap();
        assert!(close(out.cost_a, 4_745_000.0), "cost_a = {}", out.cost_a);
        assert!(close(out.cost_b, 1_911_000.0), "cost_b = {}", out.cost_b);
        assert!(close(out.roi_a, 9_490_000.0), "roi_a = {}", out.roi_a);
        assert!(close(out.roi_b, 3_822_000.0), "roi_b = {}", out.roi_b);
    }

    #[test]
    fn test_roi_is_cost_times_share() {
        let input = EstimatorInput::new(137, 19, ComplexityTier::High, 37.5);
        let out = estimate(&input).unwrap();
        assert_eq!(out.roi_a, out.cost_a * (37.5 / 100.0));
        assert_eq!(out.roi_b, out.cost_b * (37.5 / 100.0));
    }

    #[test]
    fn test_tier_ordering() {
        let cost = |tier| {
            estimate(&EstimatorInput::new(200, 18, tier, 50.0))
                .unwrap()
                .cost_a
        };
        assert!(cost(ComplexityTier::High) > cost(ComplexityTier::Medium));
        assert!(cost(ComplexityTier::Medium) > cost(ComplexityTier::Low));
    }

    #[test]
    fn test_zero_users_rejected() {
        let input = EstimatorInput::new(0, 12, ComplexityTier::Medium, 100.0);
        assert!(matches!(
            estimate(&input),
            Err(EstimatorError::InvalidInput { field: "user count", .. })
        ));
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        let input = EstimatorInput::new(50, -1, ComplexityTier::Medium, 100.0);
        assert!(matches!(
            estimate(&input),
            Err(EstimatorError::InvalidInput { field: "duration", .. })
        ));
    }

    #[test]
    fn test_negative_or_nan_roi_rejected() {
        for roi in [-0.5, f64::NAN, f64::INFINITY] {
            let input = EstimatorInput::new(50, 12, ComplexityTier::Low, roi);
            assert!(estimate(&input).is_err(), "roi {} accepted", roi);
        }
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let err = "Extreme".parse::<ComplexityTier>().unwrap_err();
        assert!(matches!(
            err,
            EstimatorError::InvalidInput { field: "complexity", .. }
        ));
        assert_eq!("HIGH".parse::<ComplexityTier>().unwrap(), ComplexityTier::High);
        assert_eq!(" low ".parse::<ComplexityTier>().unwrap(), ComplexityTier::Low);
    }

    #[test]
    fn test_overflow_reported_as_invalid_input() {
        let input = EstimatorInput::new(i64::MAX / 10, 36, ComplexityTier::Low, 10.0);
        assert!(matches!(
            estimate(&input),
            Err(EstimatorError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_output_accessors_by_stack() {
        let out = estimate(&EstimatorInput::default()).unwrap();
        assert_eq!(out.cost(Stack::Microsoft), out.cost_a);
        assert_eq!(out.cost(Stack::PowerApps), out.cost_b);
        assert_eq!(out.roi(Stack::PowerApps), out.roi_b);
    }
}
