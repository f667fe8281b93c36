//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::pricing::commission::DEFAULT_COMMISSIONS;
use crate::pricing::models::{
    DEFAULT_LABEL_FEE, DEFAULT_MISC_RATE, DEFAULT_PROFIT_RATE, HIGH_SHIPPING_PROFIT_RATE,
};
use crate::pricing::{CommissionSchedule, PriceSolver, PricingConfig};
use crate::shipping::{ChannelTable, ShippingChannel, ShippingResolver};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Destination currency per unit of origin currency
    #[serde(default)]
    pub exchange_rate: Option<f64>,

    /// Flat labelling fee per parcel
    #[serde(default = "default_label_fee")]
    pub label_fee: f64,

    /// Miscellaneous costs as a fraction of the sale price
    #[serde(default = "default_misc_rate")]
    pub misc_rate: f64,

    /// Profit target as a fraction of purchase cost
    #[serde(default = "default_profit_rate")]
    pub default_profit_rate: f64,

    /// Profit target when shipping costs more than the goods
    #[serde(default = "default_high_shipping_profit_rate")]
    pub high_shipping_profit_rate: f64,

    /// Commission entries for the three price tiers, e.g. "12%"
    #[serde(default = "default_commissions")]
    pub commissions: Vec<String>,

    /// Shipping channel table; empty uses the built-in UNI channels
    #[serde(default)]
    pub channels: Vec<ShippingChannel>,
}

fn default_label_fee() -> f64 {
    DEFAULT_LABEL_FEE
}

fn default_misc_rate() -> f64 {
    DEFAULT_MISC_RATE
}

fn default_profit_rate() -> f64 {
    DEFAULT_PROFIT_RATE
}

fn default_high_shipping_profit_rate() -> f64 {
    HIGH_SHIPPING_PROFIT_RATE
}

fn default_commissions() -> Vec<String> {
    DEFAULT_COMMISSIONS.iter().map(|c| c.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            exchange_rate: None,
            label_fee: default_label_fee(),
            misc_rate: default_misc_rate(),
            default_profit_rate: default_profit_rate(),
            high_shipping_profit_rate: default_high_shipping_profit_rate(),
            commissions: default_commissions(),
            channels: Vec::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("crossprice").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(rate) = std::env::var("CROSSPRICE_RATE") {
            if let Ok(r) = rate.parse() {
                self.exchange_rate = Some(r);
            }
        }

        if let Ok(fee) = std::env::var("CROSSPRICE_LABEL_FEE") {
            if let Ok(f) = fee.parse() {
                self.label_fee = f;
            }
        }

        if let Ok(rate) = std::env::var("CROSSPRICE_MISC_RATE") {
            if let Ok(r) = rate.parse() {
                self.misc_rate = r;
            }
        }

        self
    }

    /// The configured channel table, or the built-in one.
    pub fn channel_table(&self) -> ChannelTable {
        if self.channels.is_empty() {
            ChannelTable::builtin()
        } else {
            ChannelTable::new(self.channels.clone())
        }
    }

    pub fn pricing(&self) -> PricingConfig {
        PricingConfig {
            default_profit_rate: self.default_profit_rate,
            high_shipping_profit_rate: self.high_shipping_profit_rate,
        }
    }

    /// Parses the configured commission entries.
    pub fn commission_schedule(&self) -> Result<CommissionSchedule> {
        CommissionSchedule::parse(self.commissions.as_slice()).context("Invalid commissions in config")
    }

    pub fn resolver(&self) -> ShippingResolver {
        ShippingResolver::new(self.channel_table())
    }

    pub fn solver(&self) -> PriceSolver {
        PriceSolver::new(self.pricing(), self.resolver())
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
