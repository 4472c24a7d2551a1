//! Month-by-month projection engine

use log::debug;

use super::assumptions::ProjectionAssumptions;
use super::trajectory::{AssumptionsSummary, ProjectionPoint, ProjectionResult};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::money::Money;

/// Projects net worth forward under a fixed set of assumptions
///
/// Assumptions are validated once at construction; the engine holds no
/// other state, so a single instance can serve any number of projections.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: ProjectionAssumptions,
    monthly_rate: f64,
    max_money_amount: Money,
}

impl ProjectionEngine {
    /// Create an engine with the default bounds
    pub fn new(assumptions: ProjectionAssumptions) -> Result<Self> {
        Self::with_config(assumptions, &EngineConfig::default())
    }

    /// Create an engine, validating against the configured bounds
    pub fn with_config(assumptions: ProjectionAssumptions, config: &EngineConfig) -> Result<Self> {
        assumptions.validate(config)?;
        let monthly_rate = assumptions.monthly_return();
        debug!(
            "Annual return {}% -> monthly {:.6}%",
            assumptions.annual_return_percent,
            monthly_rate * 100.0
        );
        Ok(Self {
            assumptions,
            monthly_rate,
            max_money_amount: config.max_money_amount,
        })
    }

    pub fn assumptions(&self) -> &ProjectionAssumptions {
        &self.assumptions
    }

    /// Effective monthly growth rate as a fraction
    pub fn monthly_rate(&self) -> f64 {
        self.monthly_rate
    }

    /// Number of points actually produced for a request of `requested` months
    pub fn effective_months(&self, requested: u32) -> u32 {
        requested.min(self.assumptions.horizon_months)
    }

    /// Project `months` months forward from `start`, clamped to the horizon
    ///
    /// Each month the balance grows by the monthly rate, then the
    /// contribution is added at month end:
    /// `nw[i] = nw[i-1] * (1 + r) + contribution`, `nw[0] = start`.
    pub fn project(&self, start: Money, months: u32) -> Result<Vec<ProjectionPoint>> {
        if months == 0 {
            return Err(EngineError::assumptions("requested months must be at least 1"));
        }
        if !start.is_finite() {
            return Err(EngineError::assumptions("starting value must be a finite number"));
        }
        if start.abs() > self.max_money_amount {
            return Err(EngineError::assumptions(format!(
                "starting value {start} exceeds maximum magnitude {}",
                self.max_money_amount
            )));
        }

        let n = self.effective_months(months);
        if n < months {
            debug!("Requested {} months, clamped to horizon of {}", months, n);
        }

        let contribution = self.assumptions.monthly_contribution_amount;
        let growth_factor = 1.0 + self.monthly_rate;

        let mut points = Vec::with_capacity(n as usize);
        let mut net_worth = start;
        let mut contributions = 0.0;

        for month_index in 1..=n {
            net_worth = net_worth * growth_factor + contribution;
            contributions += contribution;
            points.push(ProjectionPoint {
                month_index,
                net_worth,
                contributions,
                growth: net_worth - start - contributions,
            });
        }

        Ok(points)
    }

    /// Project and package the result with an assumptions summary
    pub fn run(&self, start: Money, months: u32) -> Result<ProjectionResult> {
        let projection = self.project(start, months)?;
        Ok(ProjectionResult {
            projection,
            assumptions: self.summary(),
        })
    }

    pub fn summary(&self) -> AssumptionsSummary {
        AssumptionsSummary {
            annual_return: self.assumptions.annual_return_percent,
            monthly_contribution: self.assumptions.monthly_contribution_amount,
            monthly_return: self.monthly_rate * 100.0,
            horizon_months: self.assumptions.horizon_months,
        }
    }
}

/// Validate assumptions and project in one call
pub fn compute_projection(
    start: Money,
    assumptions: &ProjectionAssumptions,
    months: u32,
) -> Result<Vec<ProjectionPoint>> {
    ProjectionEngine::new(assumptions.clone())?.project(start, months)
}
