//! Entity type definitions
//!
//! Each dataset table is a fixed sequence of one of these row types:
//!
//! - [`FactorScore`] - Scored comparison factors (0-10)
//! - [`TimelinePhase`] - Implementation phases with durations and [`RiskLevel`]
//! - [`CostItem`] - Cost categories in whole dollars
//! - [`FeatureRow`] - Capability [`Support`] with notes

pub mod cost;
pub mod factor;
pub mod feature;
pub mod phase;

pub use cost::CostItem;
pub use factor::FactorScore;
pub use feature::{FeatureRow, Support};
pub use phase::{RiskLevel, TimelinePhase};
