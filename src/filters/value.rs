//! Declared-value band filter.

use super::ChannelFilter;
use crate::shipping::ShippingChannel;

/// Keeps channels whose value band contains the price (destination currency).
pub struct ValueBandFilter {
    price: f64,
}

impl ValueBandFilter {
    pub fn new(price: f64) -> Self {
        Self { price }
    }
}

impl ChannelFilter for ValueBandFilter {
    fn matches(&self, channel: &ShippingChannel) -> bool {
        self.price >= channel.min_value && self.price <= channel.max_value
    }

    fn description(&self) -> String {
        format!("Value: {:.2}", self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::make_channel;

    fn band(min: f64, max: f64) -> ShippingChannel {
        make_channel("band", (min, max), (1.0, 1000.0), (60.0, 150.0), (1.0, 0.01))
    }

    #[test]
    fn test_inside_band() {
        let filter = ValueBandFilter::new(1000.0);
        assert!(filter.matches(&band(0.0, 1500.0)));
        assert!(!filter.matches(&band(1501.0, 7000.0)));
    }

    #[test]
    fn test_boundary_values() {
        let channel = band(1501.0, 7000.0);

        // Exactly at boundaries
        assert!(ValueBandFilter::new(1501.0).matches(&channel));
        assert!(ValueBandFilter::new(7000.0).matches(&channel));

        // Just outside boundaries
        assert!(!ValueBandFilter::new(1500.99).matches(&channel));
        assert!(!ValueBandFilter::new(7000.01).matches(&channel));
    }

    #[test]
    fn test_gap_between_bands() {
        // The builtin bands leave (1500, 1501) uncovered
        let filter = ValueBandFilter::new(1500.5);
        assert!(!filter.matches(&band(0.0, 1500.0)));
        assert!(!filter.matches(&band(1501.0, 7000.0)));
    }
}
