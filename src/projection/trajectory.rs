//! Projection output rows

use serde::Serialize;

use crate::money::{serialize_cents, Money};

/// Net worth at the end of one projected month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    /// 1-based; point 1 already includes one month of growth and contribution
    pub month_index: u32,
    #[serde(serialize_with = "serialize_cents")]
    pub net_worth: Money,
    /// Cumulative contributions up to and including this month
    #[serde(serialize_with = "serialize_cents")]
    pub contributions: Money,
    /// Cumulative growth: net worth minus starting balance and contributions
    #[serde(serialize_with = "serialize_cents")]
    pub growth: Money,
}

/// Echo of the assumptions a projection ran with
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssumptionsSummary {
    /// Percent
    pub annual_return: f64,
    #[serde(serialize_with = "serialize_cents")]
    pub monthly_contribution: Money,
    /// Percent, derived from the annual return by geometric compounding
    pub monthly_return: f64,
    pub horizon_months: u32,
}

/// Response body of a projection request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    pub projection: Vec<ProjectionPoint>,
    pub assumptions: AssumptionsSummary,
}

/// First point whose net worth reaches `target`
pub fn first_reaching(points: &[ProjectionPoint], target: Money) -> Option<&ProjectionPoint> {
    points.iter().find(|p| p.net_worth >= target)
}
