//! Inputs, configuration and results of a pricing request.

use super::commission::CommissionSchedule;
use crate::error::{PricingError, Result};
use crate::package::DimensionSet;
use crate::shipping::ShippingChannel;
use serde::{Deserialize, Serialize, Serializer};

/// Flat per-parcel labelling fee, origin currency.
pub const DEFAULT_LABEL_FEE: f64 = 3.0;
/// Miscellaneous costs as a fraction of the sale price.
pub const DEFAULT_MISC_RATE: f64 = 0.039;
/// Profit target as a fraction of purchase cost.
pub const DEFAULT_PROFIT_RATE: f64 = 0.30;
/// Profit target when shipping costs more than the goods.
pub const HIGH_SHIPPING_PROFIT_RATE: f64 = 0.50;

/// Profit targets applied by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub default_profit_rate: f64,
    pub high_shipping_profit_rate: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_profit_rate: DEFAULT_PROFIT_RATE,
            high_shipping_profit_rate: HIGH_SHIPPING_PROFIT_RATE,
        }
    }
}

/// The fixed costs a single price solve works from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBasis {
    pub purchase_cost: f64,
    pub shipping_fee: f64,
    pub label_fee: f64,
    pub misc_rate: f64,
}

impl CostBasis {
    /// Costs that do not scale with the sale price.
    pub fn fixed_cost(&self) -> f64 {
        self.purchase_cost + self.shipping_fee + self.label_fee
    }
}

/// Facts about one product, as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingInputs {
    /// Purchase cost, origin currency
    pub purchase_cost: f64,
    /// Known shipping fee; `None` derives it from the channel table
    pub shipping_fee: Option<f64>,
    pub label_fee: f64,
    pub misc_rate: f64,
    /// Destination currency per unit of origin currency
    pub exchange_rate: f64,
    pub weight_g: f64,
    pub dimensions: DimensionSet,
    pub commissions: CommissionSchedule,
}

impl PricingInputs {
    /// Creates inputs with default label fee and misc rate and no shipping estimate.
    pub fn new(
        purchase_cost: f64,
        exchange_rate: f64,
        weight_g: f64,
        dimensions: DimensionSet,
        commissions: CommissionSchedule,
    ) -> Self {
        Self {
            purchase_cost,
            shipping_fee: None,
            label_fee: DEFAULT_LABEL_FEE,
            misc_rate: DEFAULT_MISC_RATE,
            exchange_rate,
            weight_g,
            dimensions,
            commissions,
        }
    }

    pub fn with_shipping_fee(mut self, fee: f64) -> Self {
        self.shipping_fee = Some(fee);
        self
    }

    pub fn with_label_fee(mut self, fee: f64) -> Self {
        self.label_fee = fee;
        self
    }

    pub fn with_misc_rate(mut self, rate: f64) -> Self {
        self.misc_rate = rate;
        self
    }

    pub fn cost_basis(&self, shipping_fee: f64) -> CostBasis {
        CostBasis {
            purchase_cost: self.purchase_cost,
            shipping_fee,
            label_fee: self.label_fee,
            misc_rate: self.misc_rate,
        }
    }

    pub fn validate(&self) -> Result<()> {
        positive("purchase cost", self.purchase_cost)?;
        positive("exchange rate", self.exchange_rate)?;
        positive("weight", self.weight_g)?;
        self.dimensions.validate()?;

        if let Some(fee) = self.shipping_fee {
            non_negative("shipping fee", fee)?;
        }
        non_negative("label fee", self.label_fee)?;
        non_negative("misc rate", self.misc_rate)?;

        if !self.commissions.rates().iter().all(|r| r.is_finite()) {
            return Err(PricingError::invalid("commission rates must be finite"));
        }

        Ok(())
    }
}

fn positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid(format!("{} must be positive, got {}", what, value)))
    }
}

fn non_negative(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid(format!("{} must not be negative, got {}", what, value)))
    }
}

/// Per-component costs at the solved price, origin currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub purchase_cost: f64,
    pub shipping_fee: f64,
    pub label_fee: f64,
    pub commission: f64,
    pub misc_fee: f64,
    pub total_cost: f64,
}

impl CostBreakdown {
    pub fn at_price(basis: &CostBasis, price: f64, commission_rate: f64) -> Self {
        let commission = price * commission_rate;
        let misc_fee = price * basis.misc_rate;
        Self {
            purchase_cost: basis.purchase_cost,
            shipping_fee: basis.shipping_fee,
            label_fee: basis.label_fee,
            commission,
            misc_fee,
            total_cost: basis.fixed_cost() + commission + misc_fee,
        }
    }
}

/// How the price/shipping iteration ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Convergence {
    /// Successive fees agreed within tolerance.
    Converged,
    /// The iteration cap was reached.
    Exhausted,
    /// A channel lookup failed; the last good fee was kept.
    Degraded,
}

/// A solved price with its cost and profit breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingResult {
    /// Sale price, origin currency
    pub target_price: f64,
    /// Sale price, destination currency
    pub target_price_dest: f64,
    pub exchange_rate: f64,
    /// One-based commission tier
    pub commission_tier: u8,
    pub commission_rate: f64,
    pub shipping_fee: f64,
    /// Channel behind the settled fee, if any lookup succeeded
    pub channel: Option<ShippingChannel>,
    pub breakdown: CostBreakdown,
    pub target_profit_rate: f64,
    pub profit: f64,
    /// Profit over purchase cost
    pub profit_ratio: f64,
    pub iterations: u32,
    /// Settled fee differs from the initial estimate
    pub shipping_changed: bool,
    pub convergence: Convergence,
    /// Channel lookup failure that stopped the iteration
    #[serde(serialize_with = "error_message")]
    pub shipping_error: Option<PricingError>,
}

impl PricingResult {
    pub fn is_degraded(&self) -> bool {
        self.convergence == Convergence::Degraded
    }
}

fn error_message<S: Serializer>(error: &Option<PricingError>, s: S) -> Result<S::Ok, S::Error> {
    error.as_ref().map(|e| e.to_string()).serialize(s)
}
