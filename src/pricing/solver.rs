//! Target price solver and the price/shipping fixed-point iteration.
//!
//! The shipping fee feeds the cost basis that sets the price, while the price picks the shipping
//! channel (value bands are in destination currency). The co-solver alternates the two until the
//! fee stops moving, a lookup fails, or the iteration cap is hit, then prices once more with the
//! settled fee.

use super::commission::{CommissionSchedule, CommissionTier};
use super::models::{
    Convergence, CostBasis, CostBreakdown, PricingConfig, PricingInputs, PricingResult,
};
use crate::error::{PricingError, Result};
use crate::shipping::{ChannelTable, ShippingChannel, ShippingResolver};
use tracing::{debug, info, warn};

/// Upper bound on price/shipping rounds.
pub const MAX_ITERATIONS: u32 = 10;
/// Fee delta (origin currency) below which the iteration has converged.
pub const FEE_EPSILON: f64 = 0.01;

/// Solves sale prices against an injected channel table and profit targets.
#[derive(Debug, Clone, Default)]
pub struct PriceSolver {
    config: PricingConfig,
    resolver: ShippingResolver,
}

impl PriceSolver {
    pub fn new(config: PricingConfig, resolver: ShippingResolver) -> Self {
        Self { config, resolver }
    }

    /// Creates a solver with default profit targets over the given table.
    pub fn with_table(table: ChannelTable) -> Self {
        Self::new(PricingConfig::default(), ShippingResolver::new(table))
    }

    /// Profit target for a cost basis; shipping dearer than the goods demands the higher rate.
    pub fn target_profit_rate(&self, basis: &CostBasis) -> f64 {
        if basis.shipping_fee > basis.purchase_cost {
            self.config.high_shipping_profit_rate
        } else {
            self.config.default_profit_rate
        }
    }

    /// Single pass with a fixed shipping fee.
    ///
    /// Tries each tier from the lowest and returns the first candidate whose destination price
    /// falls back into that same tier. With no self-consistent tier, prices at the top tier's
    /// rate anyway.
    pub fn solve_price(
        &self,
        basis: &CostBasis,
        commissions: &CommissionSchedule,
        exchange_rate: f64,
    ) -> Result<f64> {
        let target_profit = basis.purchase_cost * self.target_profit_rate(basis);
        let numerator = basis.fixed_cost() + target_profit;

        for tier in CommissionTier::ALL {
            let denominator = 1.0 - commissions.rate(tier) - basis.misc_rate;
            if denominator <= 0.0 {
                continue;
            }

            let price = numerator / denominator;
            if CommissionTier::for_price(price * exchange_rate) == tier {
                return Ok(price);
            }
        }

        let denominator = 1.0 - commissions.rate(CommissionTier::High) - basis.misc_rate;
        if denominator > 0.0 {
            debug!("No self-consistent tier, pricing at the top tier rate");
            Ok(numerator / denominator)
        } else {
            Err(PricingError::NoViablePrice)
        }
    }

    /// Solves price and shipping fee together.
    pub fn solve(&self, inputs: &PricingInputs) -> Result<PricingResult> {
        inputs.validate()?;

        let initial_fee = inputs.shipping_fee.unwrap_or(0.0);
        let mut fee = initial_fee;
        let mut channel: Option<ShippingChannel> = None;
        let mut shipping_error = None;
        let mut convergence = Convergence::Exhausted;
        let mut iterations = 0;

        while iterations < MAX_ITERATIONS {
            iterations += 1;

            let price = self.solve_price(
                &inputs.cost_basis(fee),
                &inputs.commissions,
                inputs.exchange_rate,
            )?;
            let price_dest = price * inputs.exchange_rate;

            let quote = match self.resolver.resolve(price_dest, inputs.weight_g, &inputs.dimensions) {
                Ok(quote) => quote,
                Err(e) if e.is_channel_failure() => {
                    warn!("Keeping shipping fee {:.2}: {}", fee, e);
                    shipping_error = Some(e);
                    convergence = Convergence::Degraded;
                    break;
                }
                Err(e) => return Err(e),
            };

            let delta = (quote.fee - fee).abs();
            debug!(
                "Iteration {}: price {:.2} ({:.2} dest), fee {:.2} -> {:.2} via {}",
                iterations, price, price_dest, fee, quote.fee, quote.channel.code
            );
            channel = Some(quote.channel);

            if delta < FEE_EPSILON {
                convergence = Convergence::Converged;
                break;
            }
            fee = quote.fee;
        }

        let basis = inputs.cost_basis(fee);
        let target_profit_rate = self.target_profit_rate(&basis);
        let price = self.solve_price(&basis, &inputs.commissions, inputs.exchange_rate)?;
        let price_dest = price * inputs.exchange_rate;

        let tier = CommissionTier::for_price(price_dest);
        let commission_rate = inputs.commissions.rate(tier);
        let breakdown = CostBreakdown::at_price(&basis, price, commission_rate);
        let profit = price - breakdown.total_cost;

        info!(
            "Priced at {:.2} ({:.2} dest) with shipping {:.2} after {} iteration(s)",
            price, price_dest, fee, iterations
        );

        Ok(PricingResult {
            target_price: price,
            target_price_dest: price_dest,
            exchange_rate: inputs.exchange_rate,
            commission_tier: tier.number(),
            commission_rate,
            shipping_fee: fee,
            channel,
            breakdown,
            target_profit_rate,
            profit,
            profit_ratio: profit / inputs.purchase_cost,
            iterations,
            shipping_changed: (fee - initial_fee).abs() >= FEE_EPSILON,
            convergence,
            shipping_error,
        })
    }
}
