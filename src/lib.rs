//! Finance Projection - net-worth projection and change attribution for personal finance
//!
//! This library provides:
//! - Month-by-month net-worth projections under compounding growth assumptions
//! - Milestone status classification (ahead / on track / behind) against a projection
//! - Month-over-month "what changed" category attribution from raw transactions
//! - A transport-independent request layer used by the Lambda and CLI front ends

pub mod money;
pub mod period;
pub mod error;
pub mod config;
pub mod projection;
pub mod milestone;
pub mod attribution;
pub mod api;

// Re-export commonly used types
pub use money::Money;
pub use period::Period;
pub use error::{EngineError, Result};
pub use config::EngineConfig;
pub use projection::{ProjectionAssumptions, ProjectionEngine, ProjectionPoint, ProjectionResult, compute_projection};
pub use milestone::{Milestone, MilestoneProgress, MilestoneStatus, classify_milestone, classify_milestones};
pub use attribution::{CategoryChange, TransactionRecord, TransactionType, WhatChanged, compute_what_changed};
