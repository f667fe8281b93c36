//! Quote command: solves the target price and shipping fee for one product.

use crate::config::Config;
use crate::format::Formatter;
use crate::package::{DimensionSet, Weight};
use crate::pricing::PricingInputs;
use anyhow::{Context, Result};
use tracing::info;

/// Product facts as extracted from a listing.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    /// Purchase cost, origin currency
    pub purchase_cost: f64,
    /// Known shipping fee, if any
    pub shipping_fee: Option<f64>,
    /// Weight text, e.g. "1.2 kg"
    pub weight: String,
    /// Dimension text, e.g. "100x50x30 mm"
    pub dimensions: String,
}

/// Executes a price quote.
pub struct QuoteCommand {
    config: Config,
}

impl QuoteCommand {
    /// Creates a new quote command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Builds solver inputs from the request and configuration.
    pub fn inputs(&self, request: &QuoteRequest) -> Result<PricingInputs> {
        let exchange_rate = self.config.exchange_rate.context(
            "No exchange rate: pass --rate, set CROSSPRICE_RATE, or add exchange_rate to config",
        )?;

        let weight = Weight::parse(&request.weight)
            .with_context(|| format!("Failed to parse weight: {}", request.weight))?;
        let dimensions = DimensionSet::parse(&request.dimensions)
            .with_context(|| format!("Failed to parse dimensions: {}", request.dimensions))?;
        let commissions = self.config.commission_schedule()?;

        let mut inputs = PricingInputs::new(
            request.purchase_cost,
            exchange_rate,
            weight.to_grams(),
            dimensions,
            commissions,
        )
        .with_label_fee(self.config.label_fee)
        .with_misc_rate(self.config.misc_rate);

        if let Some(fee) = request.shipping_fee {
            inputs = inputs.with_shipping_fee(fee);
        }

        Ok(inputs)
    }

    /// Solves the quote and returns formatted output.
    pub fn execute(&self, request: &QuoteRequest) -> Result<String> {
        let inputs = self.inputs(request)?;

        info!(
            "Quoting cost {:.2}, {} ({}g), {}",
            inputs.purchase_cost, request.weight, inputs.weight_g, inputs.dimensions
        );

        let result = self.config.solver().solve(&inputs).context("Failed to solve price")?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_quote(&result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::pricing::CommissionSchedule;

    fn make_test_config() -> Config {
        Config { exchange_rate: Some(12.0), ..Config::default() }
    }

    fn make_request(weight: &str, dimensions: &str) -> QuoteRequest {
        QuoteRequest {
            purchase_cost: 100.0,
            shipping_fee: Some(20.0),
            weight: weight.to_string(),
            dimensions: dimensions.to_string(),
        }
    }

    #[test]
    fn test_inputs_from_text() {
        let cmd = QuoteCommand::new(make_test_config());
        let inputs = cmd.inputs(&make_request("0.5 kg", "100x100x100 mm")).unwrap();

        assert_eq!(inputs.weight_g, 500.0);
        assert_eq!(inputs.dimensions.girth_cm(), 30.0);
        assert_eq!(inputs.exchange_rate, 12.0);
        assert_eq!(inputs.shipping_fee, Some(20.0));
        assert_eq!(inputs.label_fee, 3.0);
        assert_eq!(inputs.commissions, CommissionSchedule::default());
    }

    #[test]
    fn test_quote_basic() {
        let cmd = QuoteCommand::new(make_test_config());
        let output = cmd.execute(&make_request("500g", "10x10x10 cm")).unwrap();

        assert!(output.contains("196.71"));
        assert!(output.contains("UNI Economy Small"));
    }

    #[test]
    fn test_quote_json_format() {
        let config = Config { format: OutputFormat::Json, ..make_test_config() };
        let output = QuoteCommand::new(config).execute(&make_request("500g", "10x10x10 cm")).unwrap();

        assert!(output.starts_with('{'));
        assert!(output.contains("\"target_price\""));
    }

    #[test]
    fn test_quote_missing_rate() {
        let cmd = QuoteCommand::new(Config::default());
        let err = cmd.execute(&make_request("500g", "10x10x10 cm")).unwrap_err();
        assert!(err.to_string().contains("No exchange rate"));
    }

    #[test]
    fn test_quote_bad_weight() {
        let cmd = QuoteCommand::new(make_test_config());
        let err = cmd.execute(&make_request("heavy", "10x10x10 cm")).unwrap_err();
        assert!(err.to_string().contains("Failed to parse weight"));
    }

    #[test]
    fn test_quote_bad_dimensions() {
        let cmd = QuoteCommand::new(make_test_config());
        let err = cmd.execute(&make_request("500g", "big box")).unwrap_err();
        assert!(err.to_string().contains("Failed to parse dimensions"));
    }

    #[test]
    fn test_quote_zero_cost() {
        let cmd = QuoteCommand::new(make_test_config());
        let mut request = make_request("500g", "10x10x10 cm");
        request.purchase_cost = 0.0;

        let err = cmd.execute(&request).unwrap_err();
        assert!(err.to_string().contains("Failed to solve price"));
        assert!(format!("{:#}", err).contains("purchase cost must be positive"));
    }
}
