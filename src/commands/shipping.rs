//! Shipping command: cheapest channel for a declared price, weight and size.

use crate::config::Config;
use crate::format::Formatter;
use crate::package::{DimensionSet, Weight};
use anyhow::{Context, Result};
use tracing::info;

/// Executes a shipping fee lookup.
pub struct ShippingCommand {
    config: Config,
}

impl ShippingCommand {
    /// Creates a new shipping command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolves the channel for a destination-currency price and returns formatted output.
    pub fn execute(&self, price: f64, weight: &str, dimensions: &str) -> Result<String> {
        let weight = Weight::parse(weight)
            .with_context(|| format!("Failed to parse weight: {}", weight))?;
        let dimensions = DimensionSet::parse(dimensions)
            .with_context(|| format!("Failed to parse dimensions: {}", dimensions))?;

        info!("Looking up shipping for value {:.2}, {}, {}", price, weight, dimensions);

        let quote = self
            .config
            .resolver()
            .resolve(price, weight.to_grams(), &dimensions)
            .context("No shipping channel available")?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_shipping(&quote))
    }

    /// Lists the configured channel table.
    pub fn list(&self) -> String {
        Formatter::new(self.config.format).format_channels(&self.config.channel_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_shipping_basic() {
        let cmd = ShippingCommand::new(Config::default());
        let output = cmd.execute(1000.0, "300 g", "100x100x100 mm").unwrap();

        assert!(output.contains("UNI Economy Extra Small"));
        assert!(output.contains("10.50"));
    }

    #[test]
    fn test_shipping_oversize() {
        let cmd = ShippingCommand::new(Config::default());
        let err = cmd.execute(2236.3, "500 g", "100x100x120 cm").unwrap_err();

        assert!(err.to_string().contains("No shipping channel available"));
        assert!(format!("{:#}", err).contains("size limits"));
    }

    #[test]
    fn test_shipping_zero_weight() {
        let cmd = ShippingCommand::new(Config::default());
        let err = cmd.execute(1000.0, "0 g", "10x10x10 cm").unwrap_err();
        assert!(format!("{:#}", err).contains("weight must be positive"));
    }

    #[test]
    fn test_list_channels() {
        let cmd = ShippingCommand::new(Config { format: OutputFormat::Csv, ..Config::default() });
        let output = cmd.list();
        assert_eq!(output.lines().count(), 7);
    }
}
