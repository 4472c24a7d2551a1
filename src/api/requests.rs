//! Closed request types parsed and validated at the boundary

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::attribution::TransactionRecord;
use crate::milestone::{Milestone, MilestoneProgress};
use crate::money::Money;
use crate::period::Period;
use crate::projection::{
    ProjectionAssumptions, DEFAULT_ANNUAL_RETURN_PERCENT, DEFAULT_MONTHLY_CONTRIBUTION, DEFAULT_START_VALUE,
};

/// Query parameters of `GET projection`
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionQuery {
    pub months: u32,
    pub start_value: Money,
    pub assumptions: ProjectionAssumptions,
}

impl ProjectionQuery {
    /// `months` is required; `annualReturn`, `monthlyContribution` and
    /// `startValue` default to 0 and `horizonMonths` defaults to `months`
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ApiError> {
        let months: u32 = required(params, "months")?;
        let annual_return = optional(params, "annualReturn")?.unwrap_or(DEFAULT_ANNUAL_RETURN_PERCENT);
        let contribution = optional(params, "monthlyContribution")?.unwrap_or(DEFAULT_MONTHLY_CONTRIBUTION);
        let horizon_months = optional(params, "horizonMonths")?.unwrap_or(months);
        let start_value = optional(params, "startValue")?.unwrap_or(DEFAULT_START_VALUE);

        Ok(Self {
            months,
            start_value,
            assumptions: ProjectionAssumptions::new(annual_return, contribution, horizon_months),
        })
    }
}

/// Body of `POST what-changed`
///
/// Month tokens stay strings here so a malformed token is reported as a
/// period format error rather than a generic body error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatChangedRequest {
    pub month: String,
    pub previous_month: String,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

/// Body of `POST milestones`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestonesRequest {
    #[serde(default)]
    pub start_value: Money,
    pub assumptions: ProjectionAssumptions,
    /// `YYYY-MM`; defaults to the current month
    #[serde(default)]
    pub as_of: Option<String>,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestonesResponse {
    pub as_of: Period,
    pub milestones: Vec<MilestoneProgress>,
}

fn required<T: FromStr>(params: &HashMap<String, String>, name: &str) -> Result<T, ApiError> {
    optional(params, name)?.ok_or_else(|| ApiError::MissingParameter(name.to_string()))
}

fn optional<T: FromStr>(params: &HashMap<String, String>, name: &str) -> Result<Option<T>, ApiError> {
    match params.get(name).map(|v| v.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| ApiError::InvalidParameter {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let q = ProjectionQuery::from_params(&params(&[("months", "12")])).unwrap();
        assert_eq!(q.months, 12);
        assert_eq!(q.start_value, 0.0);
        assert_eq!(q.assumptions, ProjectionAssumptions::new(0.0, 0.0, 12));
    }

    #[test]
    fn test_all_parameters() {
        let q = ProjectionQuery::from_params(&params(&[
            ("months", "12"),
            ("annualReturn", "7.5"),
            ("monthlyContribution", "250"),
            ("horizonMonths", "6"),
            ("startValue", "1000"),
        ]))
        .unwrap();
        assert_eq!(q.assumptions, ProjectionAssumptions::new(7.5, 250.0, 6));
        assert_eq!(q.start_value, 1000.0);
    }

    #[test]
    fn test_missing_and_invalid() {
        assert!(matches!(
            ProjectionQuery::from_params(&params(&[("annualReturn", "5")])),
            Err(ApiError::MissingParameter(name)) if name == "months"
        ));
        for bad in ["1.5", "-3", "twelve"] {
            assert!(matches!(
                ProjectionQuery::from_params(&params(&[("months", bad)])),
                Err(ApiError::InvalidParameter { .. })
            ));
        }
        assert!(matches!(
            ProjectionQuery::from_params(&params(&[("months", "3"), ("annualReturn", "lots")])),
            Err(ApiError::InvalidParameter { name, .. }) if name == "annualReturn"
        ));
    }
}
