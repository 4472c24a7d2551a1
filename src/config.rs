//! Engine configuration
//!
//! Everything the engines need beyond their request inputs is passed in
//! explicitly through an `EngineConfig` value; there are no global defaults.

use std::path::Path;

use anyhow::Context;
use log::warn;
use serde::{Deserialize, Serialize};

/// Default pace tolerance in percentage points for milestone classification
pub const DEFAULT_PACE_TOLERANCE_PERCENT: f64 = 5.0;

/// Default projection horizon cap (100 years)
pub const DEFAULT_MAX_HORIZON_MONTHS: u32 = 1200;

/// Default upper bound on the annual return assumption (percent)
pub const DEFAULT_MAX_ANNUAL_RETURN_PERCENT: f64 = 1000.0;

/// Default upper bound on the magnitude of any money input
pub const DEFAULT_MAX_MONEY_AMOUNT: f64 = 1e12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Percentage points ahead of (or behind) linear pace before a milestone
    /// without a target date counts as ahead (or behind)
    #[serde(default = "default_pace_tolerance")]
    pub pace_tolerance_percent: f64,

    /// Largest horizon a projection may request
    #[serde(default = "default_max_horizon")]
    pub max_horizon_months: u32,

    /// Largest annual return assumption accepted
    #[serde(default = "default_max_annual_return")]
    pub max_annual_return_percent: f64,

    /// Largest absolute starting value or contribution accepted
    #[serde(default = "default_max_money")]
    pub max_money_amount: f64,
}

fn default_pace_tolerance() -> f64 { DEFAULT_PACE_TOLERANCE_PERCENT }
fn default_max_horizon() -> u32 { DEFAULT_MAX_HORIZON_MONTHS }
fn default_max_annual_return() -> f64 { DEFAULT_MAX_ANNUAL_RETURN_PERCENT }
fn default_max_money() -> f64 { DEFAULT_MAX_MONEY_AMOUNT }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pace_tolerance_percent: DEFAULT_PACE_TOLERANCE_PERCENT,
            max_horizon_months: DEFAULT_MAX_HORIZON_MONTHS,
            max_annual_return_percent: DEFAULT_MAX_ANNUAL_RETURN_PERCENT,
            max_money_amount: DEFAULT_MAX_MONEY_AMOUNT,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: EngineConfig = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Defaults overridden by `PACE_TOLERANCE_PERCENT`, `MAX_HORIZON_MONTHS`,
    /// `MAX_ANNUAL_RETURN_PERCENT` and `MAX_MONEY_AMOUNT` when set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = parse_var(&lookup, "PACE_TOLERANCE_PERCENT") {
            config.pace_tolerance_percent = v;
        }
        if let Some(v) = parse_var(&lookup, "MAX_HORIZON_MONTHS") {
            config.max_horizon_months = v;
        }
        if let Some(v) = parse_var(&lookup, "MAX_ANNUAL_RETURN_PERCENT") {
            config.max_annual_return_percent = v;
        }
        if let Some(v) = parse_var(&lookup, "MAX_MONEY_AMOUNT") {
            config.max_money_amount = v;
        }
        config
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("Ignoring malformed {}={:?}", key, raw);
            None
        }
    }
}
