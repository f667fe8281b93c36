//! Longest-edge and girth limit filter.

use super::ChannelFilter;
use crate::package::DimensionSet;
use crate::shipping::ShippingChannel;

/// Keeps channels whose size limits admit the package.
pub struct SizeFilter {
    max_dimension_cm: f64,
    girth_cm: f64,
}

impl SizeFilter {
    /// Creates a filter from precomputed longest edge and girth (cm).
    pub fn new(max_dimension_cm: f64, girth_cm: f64) -> Self {
        Self { max_dimension_cm, girth_cm }
    }

    pub fn for_package(dimensions: &DimensionSet) -> Self {
        Self::new(dimensions.max_dimension_cm(), dimensions.girth_cm())
    }
}

impl ChannelFilter for SizeFilter {
    fn matches(&self, channel: &ShippingChannel) -> bool {
        self.max_dimension_cm <= channel.max_dimension_cm && self.girth_cm <= channel.max_girth_cm
    }

    fn description(&self) -> String {
        format!("Size: longest {:.1}cm, girth {:.1}cm", self.max_dimension_cm, self.girth_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::make_channel;

    fn limits(max_dimension: f64, max_girth: f64) -> ShippingChannel {
        make_channel("s", (0.0, 1500.0), (1.0, 500.0), (max_dimension, max_girth), (3.0, 0.025))
    }

    #[test]
    fn test_fits() {
        let filter = SizeFilter::for_package(&DimensionSet::cm(30.0, 20.0, 10.0));
        assert!(filter.matches(&limits(60.0, 90.0)));
    }

    #[test]
    fn test_exact_limits_fit() {
        let filter = SizeFilter::new(60.0, 90.0);
        assert!(filter.matches(&limits(60.0, 90.0)));
    }

    #[test]
    fn test_longest_edge_too_long() {
        let filter = SizeFilter::for_package(&DimensionSet::cm(61.0, 10.0, 10.0));
        assert!(!filter.matches(&limits(60.0, 150.0)));
    }

    #[test]
    fn test_girth_too_large() {
        let filter = SizeFilter::for_package(&DimensionSet::cm(40.0, 30.0, 30.0));
        assert!(!filter.matches(&limits(60.0, 90.0)));
        assert!(filter.matches(&limits(60.0, 150.0)));
    }

    #[test]
    fn test_millimeter_package() {
        let filter = SizeFilter::for_package(&DimensionSet::parse("600x200x100 mm").unwrap());
        assert!(filter.matches(&limits(60.0, 90.0)));
    }
}
