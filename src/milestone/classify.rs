//! Milestone status classification

use log::debug;
use rayon::prelude::*;

use super::{Milestone, MilestoneProgress, MilestoneStatus};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::period::Period;
use crate::projection::{first_reaching, ProjectionPoint};

/// Classify one milestone against a trajectory starting at `now`
///
/// Point `i` of the trajectory is dated `now + i` months. Rules, in order:
/// 1. A zero target, or a current value already at or above the target, is ahead
/// 2. With a target date, compare the projected eta: earlier is ahead, the
///    same month is on track, later (or never within the horizon) is behind
/// 3. Without a target date, compare progress to linear pace over
///    `start_date..eta` with the configured tolerance
pub fn classify_milestone(
    milestone: &Milestone,
    trajectory: &[ProjectionPoint],
    now: Period,
    config: &EngineConfig,
) -> Result<MilestoneProgress> {
    validate(milestone)?;

    let target = milestone.target_value;
    let eta = first_reaching(trajectory, target);
    let eta_date = eta.map(|p| now.add_months(p.month_index as i32));

    let (raw_progress, status) = if target == 0.0 {
        (100.0, MilestoneStatus::Ahead)
    } else {
        let raw = milestone.current_value / target * 100.0;
        let status = if raw >= 100.0 {
            MilestoneStatus::Ahead
        } else if let Some(target_date) = milestone.target_date {
            by_target_date(eta_date, target_date)
        } else {
            let remaining = eta.map_or(trajectory.len() as f64, |p| p.month_index as f64);
            by_pace(milestone, raw, remaining, now, config.pace_tolerance_percent)
        };
        (raw, status)
    };

    debug!(
        "Milestone {}: progress {:.2}%, eta {:?}, status {}",
        milestone.id,
        raw_progress,
        eta_date.map(|p| p.to_string()),
        status.as_str()
    );

    let mut progress = MilestoneProgress {
        id: milestone.id.clone(),
        label: milestone.label.clone(),
        target_value: target,
        target_date: milestone.target_date,
        current_value: milestone.current_value,
        progress_percent: raw_progress.clamp(0.0, 100.0),
        status,
        eta_date,
        status_message: String::new(),
    };
    progress.status_message = status_message(&progress);
    Ok(progress)
}

/// Classify a batch in parallel
///
/// All milestones are validated up front so an invalid batch always reports
/// the first invalid milestone and yields no partial result.
pub fn classify_milestones(
    milestones: &[Milestone],
    trajectory: &[ProjectionPoint],
    now: Period,
    config: &EngineConfig,
) -> Result<Vec<MilestoneProgress>> {
    for milestone in milestones {
        validate(milestone)?;
    }

    milestones
        .par_iter()
        .map(|m| classify_milestone(m, trajectory, now, config))
        .collect()
}

fn validate(milestone: &Milestone) -> Result<()> {
    if !milestone.target_value.is_finite() {
        return Err(EngineError::milestone(&milestone.id, "target value must be a finite number"));
    }
    if milestone.target_value < 0.0 {
        return Err(EngineError::milestone(
            &milestone.id,
            format!("target value {} must be >= 0", milestone.target_value),
        ));
    }
    if !milestone.current_value.is_finite() {
        return Err(EngineError::milestone(&milestone.id, "current value must be a finite number"));
    }
    Ok(())
}

fn by_target_date(eta_date: Option<Period>, target_date: Period) -> MilestoneStatus {
    match eta_date {
        Some(eta) if eta < target_date => MilestoneStatus::Ahead,
        Some(eta) if eta == target_date => MilestoneStatus::OnTrack,
        _ => MilestoneStatus::Behind,
    }
}

fn by_pace(
    milestone: &Milestone,
    progress: f64,
    remaining_months: f64,
    now: Period,
    tolerance: f64,
) -> MilestoneStatus {
    let elapsed = milestone
        .start_date
        .map_or(0, |start| start.months_until(now).max(0)) as f64;
    let total = elapsed + remaining_months;
    let expected = if total > 0.0 { elapsed / total * 100.0 } else { 0.0 };

    let lead = progress - expected;
    if lead >= tolerance {
        MilestoneStatus::Ahead
    } else if lead <= -tolerance {
        MilestoneStatus::Behind
    } else {
        MilestoneStatus::OnTrack
    }
}

/// Human-readable rendering of a classification
pub fn status_message(progress: &MilestoneProgress) -> String {
    let label = &progress.label;

    if progress.progress_percent >= 100.0 {
        return format!("{label}: target reached");
    }

    match (progress.eta_date, progress.target_date) {
        (Some(eta), Some(target)) => {
            let gap = eta.months_until(target);
            match progress.status {
                MilestoneStatus::Ahead => format!(
                    "{label}: projected to reach target in {eta}, {} ahead of {target}",
                    months(gap)
                ),
                MilestoneStatus::OnTrack => format!("{label}: on track to reach target in {target}"),
                MilestoneStatus::Behind => format!(
                    "{label}: projected to reach target in {eta}, {} after {target}",
                    months(-gap)
                ),
            }
        }
        (None, Some(target)) => {
            format!("{label}: target not reached within the projection horizon (due {target})")
        }
        (eta, None) => {
            let pace = match progress.status {
                MilestoneStatus::Ahead => "ahead of pace",
                MilestoneStatus::OnTrack => "on pace",
                MilestoneStatus::Behind => "behind pace",
            };
            match eta {
                Some(eta) => format!(
                    "{label}: {:.1}% complete, {pace}, projected to reach target in {eta}",
                    progress.progress_percent
                ),
                None => format!(
                    "{label}: {:.1}% complete, {pace}, not reached within the projection horizon",
                    progress.progress_percent
                ),
            }
        }
    }
}

fn months(n: i64) -> String {
    if n == 1 {
        "1 month".to_string()
    } else {
        format!("{n} months")
    }
}
