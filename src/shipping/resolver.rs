//! Cheapest-channel selection over the value, weight and size filters.

use super::channel::{ChannelTable, ShippingChannel};
use crate::error::{PricingError, Result};
use crate::filters::{ChannelFilter, SizeFilter, ValueBandFilter, WeightBandFilter};
use crate::package::DimensionSet;
use serde::Serialize;
use tracing::{debug, trace};

/// The channel picked for a parcel and what it costs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippingQuote {
    pub channel: ShippingChannel,
    /// Fee in origin currency
    pub fee: f64,
    /// Declared value used for band matching, destination currency
    pub price: f64,
    pub weight_g: f64,
    pub max_dimension_cm: f64,
    pub girth_cm: f64,
    pub formula: String,
}

/// Stateless lookup over an injected channel table.
#[derive(Debug, Clone, Default)]
pub struct ShippingResolver {
    table: ChannelTable,
}

impl ShippingResolver {
    pub fn new(table: ChannelTable) -> Self {
        Self { table }
    }

    /// Finds the cheapest channel accepting the declared price, weight and package size.
    pub fn resolve(
        &self,
        price: f64,
        weight_g: f64,
        dimensions: &DimensionSet,
    ) -> Result<ShippingQuote> {
        if !(price.is_finite() && price > 0.0) {
            return Err(PricingError::invalid(format!("price must be positive, got {}", price)));
        }
        if !(weight_g.is_finite() && weight_g > 0.0) {
            return Err(PricingError::invalid(format!("weight must be positive, got {}", weight_g)));
        }
        dimensions.validate()?;

        let max_dimension_cm = dimensions.max_dimension_cm();
        let girth_cm = dimensions.girth_cm();

        let candidates: Vec<&ShippingChannel> = self.table.iter().collect();

        let by_value = stage(&ValueBandFilter::new(price), candidates);
        if by_value.is_empty() {
            return Err(PricingError::NoChannelForPrice { price });
        }

        let by_weight = stage(&WeightBandFilter::new(weight_g), by_value);
        if by_weight.is_empty() {
            return Err(PricingError::NoChannelForWeight { weight_g });
        }

        let fitting = stage(&SizeFilter::new(max_dimension_cm, girth_cm), by_weight);

        // Strict comparison keeps the first channel on equal fees.
        let mut best: Option<(&ShippingChannel, f64)> = None;
        for channel in fitting {
            let fee = channel.fee(weight_g);
            match best {
                Some((_, lowest)) if fee >= lowest => {}
                _ => best = Some((channel, fee)),
            }
        }

        let Some((channel, fee)) = best else {
            return Err(PricingError::OversizeForChannel { max_dimension_cm, girth_cm });
        };

        debug!("Selected {} ({}) at {:.2} for {:.2}", channel.channel_name, channel.code, fee, price);

        Ok(ShippingQuote {
            channel: channel.clone(),
            fee,
            price,
            weight_g,
            max_dimension_cm,
            girth_cm,
            formula: channel.formula(weight_g),
        })
    }
}

fn stage<'a>(filter: &dyn ChannelFilter, channels: Vec<&'a ShippingChannel>) -> Vec<&'a ShippingChannel> {
    let before = channels.len();
    let kept = filter.apply(channels);
    trace!("{}: {} of {} channels remain", filter.description(), kept.len(), before);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::make_channel;

    fn builtin() -> ShippingResolver {
        ShippingResolver::new(ChannelTable::builtin())
    }

    fn small_box() -> DimensionSet {
        DimensionSet::cm(10.0, 10.0, 10.0)
    }

    #[test]
    fn test_low_value_light_parcel() {
        let quote = builtin().resolve(1000.0, 300.0, &small_box()).unwrap();
        assert_eq!(quote.channel.code, "UNW");
        assert!((quote.fee - 10.5).abs() < 1e-9);
        assert_eq!(quote.formula, "3 + 0.025 × 300");
        assert_eq!(quote.max_dimension_cm, 10.0);
        assert_eq!(quote.girth_cm, 30.0);
    }

    #[test]
    fn test_mid_value_band() {
        let quote = builtin().resolve(2236.3, 500.0, &small_box()).unwrap();
        assert_eq!(quote.channel.channel_name, "UNI Economy Small");
        assert!((quote.fee - 28.5).abs() < 1e-9);
    }

    #[test]
    fn test_heavy_mid_value() {
        let quote = builtin().resolve(3000.0, 3000.0, &DimensionSet::cm(80.0, 40.0, 30.0)).unwrap();
        assert_eq!(quote.channel.channel_name, "UNI Economy Big");
        assert!((quote.fee - 87.0).abs() < 1e-9);
    }

    #[test]
    fn test_premium_band() {
        let quote = builtin().resolve(10000.0, 1000.0, &small_box()).unwrap();
        assert_eq!(quote.channel.code, "UNM");
        assert!((quote.fee - 47.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_channel_for_price() {
        let err = builtin().resolve(300_000.0, 500.0, &small_box()).unwrap_err();
        assert_eq!(err, PricingError::NoChannelForPrice { price: 300_000.0 });

        // Gap between the economy and small bands
        let err = builtin().resolve(1500.5, 500.0, &small_box()).unwrap_err();
        assert!(matches!(err, PricingError::NoChannelForPrice { .. }));
    }

    #[test]
    fn test_no_channel_for_weight() {
        let err = builtin().resolve(2000.0, 30_000.0, &small_box()).unwrap_err();
        assert_eq!(err, PricingError::NoChannelForWeight { weight_g: 30_000.0 });
    }

    #[test]
    fn test_oversize() {
        let err = builtin().resolve(2236.3, 500.0, &DimensionSet::cm(100.0, 100.0, 120.0)).unwrap_err();
        assert_eq!(err, PricingError::OversizeForChannel { max_dimension_cm: 120.0, girth_cm: 320.0 });
    }

    #[test]
    fn test_invalid_inputs() {
        let resolver = builtin();
        assert!(matches!(
            resolver.resolve(0.0, 500.0, &small_box()),
            Err(PricingError::InvalidInput(_))
        ));
        assert!(matches!(
            resolver.resolve(1000.0, 0.0, &small_box()),
            Err(PricingError::InvalidInput(_))
        ));
        assert!(matches!(
            resolver.resolve(1000.0, -5.0, &small_box()),
            Err(PricingError::InvalidInput(_))
        ));
        assert!(matches!(
            resolver.resolve(1000.0, 500.0, &DimensionSet::cm(10.0, 0.0, 10.0)),
            Err(PricingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cheapest_wins_regardless_of_order() {
        let pricey = make_channel("pricey", (0.0, 1000.0), (1.0, 1000.0), (60.0, 150.0), (20.0, 0.01));
        let cheap = make_channel("cheap", (0.0, 1000.0), (1.0, 1000.0), (60.0, 150.0), (5.0, 0.01));
        let resolver = ShippingResolver::new(ChannelTable::new(vec![pricey, cheap]));

        let quote = resolver.resolve(500.0, 100.0, &small_box()).unwrap();
        assert_eq!(quote.channel.channel_name, "cheap");
        assert!((quote.fee - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_tie_goes_to_first_in_table() {
        let first = make_channel("first", (0.0, 1000.0), (1.0, 1000.0), (60.0, 150.0), (10.0, 0.0));
        let second = make_channel("second", (0.0, 1000.0), (1.0, 1000.0), (60.0, 150.0), (10.0, 0.0));
        let resolver = ShippingResolver::new(ChannelTable::new(vec![first, second]));

        let quote = resolver.resolve(500.0, 100.0, &small_box()).unwrap();
        assert_eq!(quote.channel.channel_name, "first");
    }

    #[test]
    fn test_empty_table() {
        let resolver = ShippingResolver::new(ChannelTable::new(Vec::new()));
        let err = resolver.resolve(500.0, 100.0, &small_box()).unwrap_err();
        assert!(matches!(err, PricingError::NoChannelForPrice { .. }));
    }

    #[test]
    fn test_deterministic() {
        let resolver = builtin();
        let a = resolver.resolve(4321.0, 1234.0, &small_box()).unwrap();
        let b = resolver.resolve(4321.0, 1234.0, &small_box()).unwrap();
        assert_eq!(a, b);
    }
}
