//! Channel eligibility filters applied in sequence by the resolver.

pub mod size;
pub mod value;
pub mod weight;

use crate::shipping::ShippingChannel;

pub use size::SizeFilter;
pub use value::ValueBandFilter;
pub use weight::WeightBandFilter;

/// Trait for filtering shipping channels.
pub trait ChannelFilter: Send + Sync {
    /// Returns true if the channel accepts the parcel.
    fn matches(&self, channel: &ShippingChannel) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;

    /// Keeps the channels that pass, preserving order.
    fn apply<'a>(&self, channels: Vec<&'a ShippingChannel>) -> Vec<&'a ShippingChannel> {
        channels.into_iter().filter(|c| self.matches(c)).collect()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::make_channel;
    use super::*;

    #[test]
    fn test_apply_preserves_order() {
        let a = make_channel("a", (0.0, 100.0), (1.0, 10.0), (10.0, 30.0), (1.0, 0.0));
        let b = make_channel("b", (50.0, 200.0), (1.0, 10.0), (10.0, 30.0), (1.0, 0.0));
        let c = make_channel("c", (0.0, 80.0), (1.0, 10.0), (10.0, 30.0), (1.0, 0.0));

        let kept = ValueBandFilter::new(60.0).apply(vec![&a, &b, &c]);
        let names: Vec<&str> = kept.iter().map(|c| c.channel_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let kept = ValueBandFilter::new(90.0).apply(vec![&a, &b, &c]);
        let names: Vec<&str> = kept.iter().map(|c| c.channel_name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_apply_empty() {
        let kept = WeightBandFilter::new(10.0).apply(Vec::new());
        assert!(kept.is_empty());
    }

    #[test]
    fn test_descriptions() {
        assert!(ValueBandFilter::new(1500.0).description().contains("1500.00"));
        assert!(WeightBandFilter::new(500.0).description().contains("500"));
        assert!(SizeFilter::new(60.0, 150.0).description().contains("girth 150.0cm"));
    }
}
