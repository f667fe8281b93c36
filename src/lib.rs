//! crossprice - Shipping channel and target price co-solver for cross-border resellers
//!
//! Picks the cheapest eligible shipping channel for a parcel and solves the sale price that
//! hits a profit target after commission, misc fees and shipping, iterating because the
//! shipping channel itself depends on the sale price.

pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod format;
pub mod package;
pub mod pricing;
pub mod shipping;

pub use config::Config;
pub use error::PricingError;
pub use package::{DimensionSet, LengthUnit, Weight, WeightUnit};
pub use pricing::{CommissionSchedule, CommissionTier, PriceSolver, PricingInputs, PricingResult};
pub use shipping::{ChannelTable, ShippingChannel, ShippingQuote, ShippingResolver};
