//! Weight band filter.

use super::ChannelFilter;
use crate::shipping::ShippingChannel;

/// Keeps channels whose weight band contains the parcel weight.
pub struct WeightBandFilter {
    weight_g: f64,
}

impl WeightBandFilter {
    pub fn new(weight_g: f64) -> Self {
        Self { weight_g }
    }
}

impl ChannelFilter for WeightBandFilter {
    fn matches(&self, channel: &ShippingChannel) -> bool {
        self.weight_g >= channel.min_weight_g && self.weight_g <= channel.max_weight_g
    }

    fn description(&self) -> String {
        format!("Weight: {}g", self.weight_g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::make_channel;

    #[test]
    fn test_weight_band() {
        let channel = make_channel("w", (0.0, 1500.0), (501.0, 25000.0), (60.0, 150.0), (23.0, 0.017));

        assert!(!WeightBandFilter::new(500.0).matches(&channel));
        assert!(WeightBandFilter::new(501.0).matches(&channel));
        assert!(WeightBandFilter::new(12000.0).matches(&channel));
        assert!(WeightBandFilter::new(25000.0).matches(&channel));
        assert!(!WeightBandFilter::new(25000.5).matches(&channel));
    }

    #[test]
    fn test_fractional_weight_between_bands() {
        let light = make_channel("l", (0.0, 1500.0), (1.0, 500.0), (60.0, 90.0), (3.0, 0.025));
        let heavy = make_channel("h", (0.0, 1500.0), (501.0, 25000.0), (60.0, 150.0), (23.0, 0.017));

        let filter = WeightBandFilter::new(500.5);
        assert!(!filter.matches(&light));
        assert!(!filter.matches(&heavy));
    }
}
