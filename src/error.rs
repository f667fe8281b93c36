//! Error taxonomy for the shipping resolver and price solver.

use thiserror::Error;

/// Recoverable failures reported by the pricing core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Caller-side validation failure (non-positive cost, weight, rate, size, short schedule).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No channel's value band contains the declared price.
    #[error("No shipping channel accepts a declared value of {price:.2}")]
    NoChannelForPrice { price: f64 },

    /// Channels exist for the price band, but none takes this weight.
    #[error("No shipping channel in the value band accepts a weight of {weight_g}g")]
    NoChannelForWeight { weight_g: f64 },

    /// Package is too large for every remaining channel.
    #[error("Package exceeds channel size limits: longest edge {max_dimension_cm:.1}cm, girth {girth_cm:.1}cm")]
    OversizeForChannel { max_dimension_cm: f64, girth_cm: f64 },

    /// Commission and misc rates leave no positive-denominator solution.
    #[error("No viable price: commission and misc rates consume the entire sale price")]
    NoViablePrice,
}

impl PricingError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        PricingError::InvalidInput(message.into())
    }

    /// Returns true for the three channel-lookup failures.
    pub fn is_channel_failure(&self) -> bool {
        matches!(
            self,
            PricingError::NoChannelForPrice { .. }
                | PricingError::NoChannelForWeight { .. }
                | PricingError::OversizeForChannel { .. }
        )
    }
}

pub type Result<T, E = PricingError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = PricingError::NoChannelForPrice { price: 1500.456 };
        assert_eq!(err.to_string(), "No shipping channel accepts a declared value of 1500.46");

        let err = PricingError::OversizeForChannel { max_dimension_cm: 120.0, girth_cm: 320.0 };
        assert!(err.to_string().contains("girth 320.0cm"));

        let err = PricingError::invalid("weight must be positive");
        assert_eq!(err.to_string(), "Invalid input: weight must be positive");
    }

    #[test]
    fn test_channel_failure_classification() {
        assert!(PricingError::NoChannelForPrice { price: 1.0 }.is_channel_failure());
        assert!(PricingError::NoChannelForWeight { weight_g: 1.0 }.is_channel_failure());
        assert!(PricingError::OversizeForChannel { max_dimension_cm: 1.0, girth_cm: 3.0 }
            .is_channel_failure());
        assert!(!PricingError::NoViablePrice.is_channel_failure());
        assert!(!PricingError::invalid("x").is_channel_failure());
    }
}
