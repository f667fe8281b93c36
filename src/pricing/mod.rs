//! Commission tiers, the target price solver and its inputs and results.

pub mod commission;
pub mod models;
pub mod solver;

pub use commission::{parse_rate, tier_for, CommissionSchedule, CommissionTier};
pub use models::{
    Convergence, CostBasis, CostBreakdown, PricingConfig, PricingInputs, PricingResult,
};
pub use solver::{PriceSolver, FEE_EPSILON, MAX_ITERATIONS};
