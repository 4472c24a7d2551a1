//! Net-worth projection under compounding growth assumptions

mod assumptions;
mod engine;
mod trajectory;

pub use assumptions::ProjectionAssumptions;
pub use engine::{ProjectionEngine, compute_projection};
pub use trajectory::{AssumptionsSummary, ProjectionPoint, ProjectionResult, first_reaching};

// ============================================================================
// Request Defaults
// ============================================================================
// Applied by the request layer when the caller omits a parameter.
// - Starting balance is zero: only contributions and their growth accumulate
// - Zero return means no compounding; the trajectory is a straight line

/// Default annual return assumption (percent)
pub const DEFAULT_ANNUAL_RETURN_PERCENT: f64 = 0.0;

/// Default monthly contribution
pub const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 0.0;

/// Default starting balance
pub const DEFAULT_START_VALUE: f64 = 0.0;
