//! crossprice - Shipping channel and target price co-solver for cross-border resellers

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossprice::commands::{QuoteCommand, QuoteRequest, ShippingCommand};
use crossprice::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "crossprice",
    version,
    about = "Shipping channel and target price co-solver for cross-border resellers",
    long_about = "Picks the cheapest eligible shipping channel and solves the sale price that hits a profit target after commission, misc fees and shipping."
)]
struct Cli {
    /// Exchange rate: destination currency per unit of origin currency
    #[arg(long, global = true, env = "CROSSPRICE_RATE")]
    rate: Option<f64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format: table, json, markdown, csv [default: table]
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the target sale price and shipping fee
    #[command(alias = "q")]
    Quote {
        /// Purchase cost in origin currency
        cost: f64,

        /// Weight, e.g. "500g" or "1.2 kg"
        #[arg(short, long)]
        weight: String,

        /// Dimensions, e.g. "100x50x30 mm" (unit defaults to mm)
        #[arg(short, long)]
        dimensions: String,

        /// Known shipping fee to start from
        #[arg(long)]
        shipping_fee: Option<f64>,

        /// Commission rates for the three price tiers (comma-separated, e.g. 12%,14%,15%)
        #[arg(long, value_delimiter = ',')]
        commissions: Option<Vec<String>>,

        /// Flat label fee per parcel
        #[arg(long)]
        label_fee: Option<f64>,

        /// Miscellaneous costs as a fraction of the sale price
        #[arg(long)]
        misc_rate: Option<f64>,
    },

    /// Look up the cheapest shipping channel for a declared value
    #[command(alias = "s")]
    Shipping {
        /// Declared value in destination currency
        price: f64,

        /// Weight, e.g. "500g" or "1.2 kg"
        #[arg(short, long)]
        weight: String,

        /// Dimensions, e.g. "100x50x30 mm" (unit defaults to mm)
        #[arg(short, long)]
        dimensions: String,
    },

    /// List the shipping channel table
    Channels,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    apply_global_overrides(&mut config, &cli);

    match cli.command {
        Commands::Quote {
            cost,
            weight,
            dimensions,
            shipping_fee,
            commissions,
            label_fee,
            misc_rate,
        } => {
            if let Some(c) = commissions {
                config.commissions = c;
            }
            if let Some(fee) = label_fee {
                config.label_fee = fee;
            }
            if let Some(rate) = misc_rate {
                config.misc_rate = rate;
            }

            let cmd = QuoteCommand::new(config);
            let request = QuoteRequest { purchase_cost: cost, shipping_fee, weight, dimensions };
            let output = cmd.execute(&request)?;
            println!("{}", output);
        }

        Commands::Shipping { price, weight, dimensions } => {
            let cmd = ShippingCommand::new(config);
            let output = cmd.execute(price, &weight, &dimensions)?;
            println!("{}", output);
        }

        Commands::Channels => {
            let cmd = ShippingCommand::new(config);
            println!("{}", cmd.list());
        }
    }

    Ok(())
}

/// Global flags win over config and env only when given.
fn apply_global_overrides(config: &mut Config, cli: &Cli) {
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(rate) = cli.rate {
        config.exchange_rate = Some(rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_format_kept_without_flag() {
        let cli = Cli::try_parse_from(["crossprice", "channels"]).unwrap();
        let mut config = Config { format: OutputFormat::Json, ..Config::default() };

        apply_global_overrides(&mut config, &cli);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_format_flag_overrides_config() {
        let cli = Cli::try_parse_from(["crossprice", "--format", "csv", "--rate", "11.5", "channels"])
            .unwrap();
        let mut config = Config { format: OutputFormat::Json, ..Config::default() };

        apply_global_overrides(&mut config, &cli);
        assert_eq!(config.format, OutputFormat::Csv);
        assert_eq!(config.exchange_rate, Some(11.5));
    }
}
