//! Dataset provider - the fixed comparison tables
//!
//! Every table is a compile-time constant. Accessors hand out the full
//! sequence in its fixed order; callers filter or style at render time.

use crate::core::entity::{Entity, Stack};
use crate::entities::{CostItem, FactorScore, FeatureRow, RiskLevel, Support, TimelinePhase};

static FACTOR_SCORES: [FactorScore; 10] = [
    FactorScore::new("Development Speed", 7, 9),
    FactorScore::new("Scalability", 6, 9),
    FactorScore::new("Initial Cost", 8, 6),
    FactorScore::new("Ongoing Cost", 7, 7),
    FactorScore::new("Customizability", 9, 7),
    FactorScore::new("Maintenance Effort", 6, 8),
    FactorScore::new("Time-to-Market", 7, 9),
    FactorScore::new("Security Features", 8, 9),
    FactorScore::new("Integration Capability", 9, 8),
    FactorScore::new("Learning Curve", 8, 6),
];

static TIMELINE_PHASES: [TimelinePhase; 6] = [
    TimelinePhase::new("Environment Setup", 30, 15, RiskLevel::Low),
    TimelinePhase::new("Base Implementation", 45, 30, RiskLevel::Medium),
    TimelinePhase::new("Core Features", 60, 45, RiskLevel::High),
    TimelinePhase::new("Integration", 45, 30, RiskLevel::High),
    TimelinePhase::new("Testing", 30, 30, RiskLevel::Medium),
    TimelinePhase::new("Deployment", 15, 15, RiskLevel::Low),
];

static COST_ITEMS: [CostItem; 5] = [
    CostItem::new("Licensing", 50_000, 70_000),
    CostItem::new("Infrastructure", 30_000, 15_000),
    CostItem::new("Development", 80_000, 60_000),
    CostItem::new("Training", 20_000, 30_000),
    CostItem::new("Maintenance", 25_000, 15_000),
];

static FEATURE_ROWS: [FeatureRow; 10] = [
    FeatureRow::new(
        "Built-in Security",
        Support::Full,
        Support::Full,
        "Both platforms offer enterprise-grade security",
    ),
    FeatureRow::new(
        "Compliance Tools",
        Support::Full,
        Support::Full,
        "Built-in compliance features in both",
    ),
    FeatureRow::new(
        "Mobile Support",
        Support::Partial,
        Support::Full,
        "Native in Power Apps, requires custom dev in MS Stack",
    ),
    FeatureRow::new(
        "Custom Development",
        Support::Full,
        Support::Partial,
        "Full control in MS Stack, limited in Power Apps",
    ),
    FeatureRow::new(
        "Third-party Integration",
        Support::Full,
        Support::Full,
        "Extensive integration capabilities in both",
    ),
    FeatureRow::new(
        "Automated Testing",
        Support::Full,
        Support::Full,
        "Built-in testing tools available",
    ),
    FeatureRow::new(
        "Version Control",
        Support::Full,
        Support::Full,
        "Standard source control integration",
    ),
    FeatureRow::new(
        "Deployment Automation",
        Support::Full,
        Support::Full,
        "CI/CD pipeline support",
    ),
    FeatureRow::new(
        "Performance Monitoring",
        Support::Full,
        Support::Full,
        "Comprehensive monitoring tools",
    ),
    FeatureRow::new(
        "Disaster Recovery",
        Support::Full,
        Support::Full,
        "Built-in DR capabilities",
    ),
];

/// Scored comparison factors, in display order
pub fn factor_scores() -> &'static [FactorScore] {
    &FACTOR_SCORES
}

/// Implementation phases, in execution order
pub fn timeline_phases() -> &'static [TimelinePhase] {
    &TIMELINE_PHASES
}

/// Cost categories, in display order
pub fn cost_items() -> &'static [CostItem] {
    &COST_ITEMS
}

/// Feature support rows, in display order
pub fn feature_rows() -> &'static [FeatureRow] {
    &FEATURE_ROWS
}

/// Total cost of ownership for one stack (sum of all cost categories)
pub fn total_cost(stack: Stack) -> u64 {
    cost_items().iter().map(|c| u64::from(c.value(stack))).sum()
}

/// Signed difference between one stack's total cost and the other's
pub fn cost_delta(stack: Stack) -> i64 {
    total_cost(stack) as i64 - total_cost(stack.other()) as i64
}

/// Total implementation time for one stack, in days
pub fn total_duration(stack: Stack) -> u32 {
    timeline_phases().iter().map(|p| p.value(stack)).sum()
}
