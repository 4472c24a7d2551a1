//! Projection assumptions and the annual-to-monthly rate conversion

use serde::{Deserialize, Serialize};

use super::{DEFAULT_ANNUAL_RETURN_PERCENT, DEFAULT_MONTHLY_CONTRIBUTION};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::money::Money;

/// Growth and contribution assumptions for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionAssumptions {
    /// Annual return in percent (7.0 = 7%). May be zero or negative, never <= -100
    #[serde(rename = "annualReturn", alias = "annualReturnPercent", default = "default_annual_return")]
    pub annual_return_percent: f64,

    /// Amount added at the end of every month
    #[serde(
        rename = "monthlyContribution",
        alias = "monthlyContributionAmount",
        default = "default_monthly_contribution"
    )]
    pub monthly_contribution_amount: Money,

    /// Hard cap on the number of projected months
    #[serde(rename = "horizonMonths")]
    pub horizon_months: u32,
}

fn default_annual_return() -> f64 { DEFAULT_ANNUAL_RETURN_PERCENT }
fn default_monthly_contribution() -> f64 { DEFAULT_MONTHLY_CONTRIBUTION }

impl ProjectionAssumptions {
    pub fn new(annual_return_percent: f64, monthly_contribution_amount: Money, horizon_months: u32) -> Self {
        Self {
            annual_return_percent,
            monthly_contribution_amount,
            horizon_months,
        }
    }

    /// Effective monthly growth rate as a fraction
    ///
    /// Geometric compounding: (1 + annual)^(1/12) - 1
    pub fn monthly_return(&self) -> f64 {
        (1.0 + self.annual_return_percent / 100.0).powf(1.0 / 12.0) - 1.0
    }

    /// Effective monthly growth rate in percent
    pub fn monthly_return_percent(&self) -> f64 {
        self.monthly_return() * 100.0
    }

    /// Reject assumptions that are out of domain or would overflow
    pub fn validate(&self, config: &EngineConfig) -> Result<()> {
        let annual = self.annual_return_percent;
        if !annual.is_finite() {
            return Err(EngineError::assumptions("annual return must be a finite number"));
        }
        if annual <= -100.0 {
            return Err(EngineError::assumptions(format!(
                "annual return {annual}% implies total loss; must be greater than -100"
            )));
        }
        if annual > config.max_annual_return_percent {
            return Err(EngineError::assumptions(format!(
                "annual return {annual}% exceeds maximum {}%",
                config.max_annual_return_percent
            )));
        }

        let contribution = self.monthly_contribution_amount;
        if !contribution.is_finite() {
            return Err(EngineError::assumptions("monthly contribution must be a finite number"));
        }
        if contribution < 0.0 {
            return Err(EngineError::assumptions(format!(
                "monthly contribution {contribution} must be >= 0"
            )));
        }
        if contribution > config.max_money_amount {
            return Err(EngineError::assumptions(format!(
                "monthly contribution {contribution} exceeds maximum {}",
                config.max_money_amount
            )));
        }

        if self.horizon_months == 0 {
            return Err(EngineError::assumptions("horizon must be at least 1 month"));
        }
        if self.horizon_months > config.max_horizon_months {
            return Err(EngineError::assumptions(format!(
                "horizon of {} months exceeds maximum {}",
                self.horizon_months, config.max_horizon_months
            )));
        }

        Ok(())
    }
}
