//! Milestone tracking against a projected trajectory

mod classify;

pub use classify::{classify_milestone, classify_milestones, status_message};

use serde::{Deserialize, Serialize};

use crate::money::{serialize_cents, Money};
use crate::period::Period;

/// A target financial value with an optional target date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub label: String,
    pub target_value: Money,
    #[serde(default)]
    pub target_date: Option<Period>,
    pub current_value: Money,
    /// When tracking began; drives the pace rule when there is no target date
    #[serde(default)]
    pub start_date: Option<Period>,
}

/// Progress classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    Ahead,
    OnTrack,
    Behind,
}

impl MilestoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MilestoneStatus::Ahead => "ahead",
            MilestoneStatus::OnTrack => "on_track",
            MilestoneStatus::Behind => "behind",
        }
    }
}

/// A milestone with its derived status
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneProgress {
    pub id: String,
    pub label: String,
    #[serde(serialize_with = "serialize_cents")]
    pub target_value: Money,
    pub target_date: Option<Period>,
    #[serde(serialize_with = "serialize_cents")]
    pub current_value: Money,
    /// Clamped to [0, 100] for display
    pub progress_percent: f64,
    pub status: MilestoneStatus,
    /// First projected month at which the target is reached
    pub eta_date: Option<Period>,
    pub status_message: String,
}
