//! Commission tiers keyed by destination-currency sale price.

use crate::error::{PricingError, Result};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static RATE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)").unwrap());

/// Upper bound (inclusive) of the lowest tier, destination currency.
pub const LOW_TIER_MAX: f64 = 1500.0;
/// Upper bound (inclusive) of the middle tier, destination currency.
pub const MID_TIER_MAX: f64 = 5000.0;

/// Marketplace default rates used when none were extracted.
pub const DEFAULT_COMMISSIONS: [&str; 3] = ["12%", "14%", "15%"];

/// One of the three commission bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionTier {
    Low,
    Mid,
    High,
}

impl CommissionTier {
    pub const ALL: [CommissionTier; 3] = [CommissionTier::Low, CommissionTier::Mid, CommissionTier::High];

    /// Resolves the tier for a destination-currency price.
    pub fn for_price(price: f64) -> Self {
        if price <= LOW_TIER_MAX {
            CommissionTier::Low
        } else if price <= MID_TIER_MAX {
            CommissionTier::Mid
        } else {
            CommissionTier::High
        }
    }

    /// Zero-based index into the schedule.
    pub fn index(&self) -> usize {
        match self {
            CommissionTier::Low => 0,
            CommissionTier::Mid => 1,
            CommissionTier::High => 2,
        }
    }

    /// One-based tier number as shown to sellers.
    pub fn number(&self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for CommissionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommissionTier::Low => write!(f, "tier 1 (<= {})", LOW_TIER_MAX),
            CommissionTier::Mid => write!(f, "tier 2 (<= {})", MID_TIER_MAX),
            CommissionTier::High => write!(f, "tier 3 (> {})", MID_TIER_MAX),
        }
    }
}

/// Zero-based tier index for a destination-currency price.
pub fn tier_for(price: f64) -> usize {
    CommissionTier::for_price(price).index()
}

/// Parses a percentage entry like "12%" into a fraction; malformed entries are 0.
pub fn parse_rate(entry: &str) -> f64 {
    RATE_NUMBER
        .captures(entry)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|pct| pct / 100.0)
        .unwrap_or(0.0)
}

/// Three commission fractions, lowest tier first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommissionSchedule {
    rates: [f64; 3],
}

impl CommissionSchedule {
    pub fn new(rates: [f64; 3]) -> Self {
        Self { rates }
    }

    /// Builds a schedule from already-numeric fractions.
    pub fn from_fractions(rates: &[f64]) -> Result<Self> {
        match rates {
            [low, mid, high, ..] => Ok(Self::new([*low, *mid, *high])),
            _ => Err(short_schedule(rates.len())),
        }
    }

    /// Parses percentage strings. Duplicates are kept: each entry maps to one tier.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let rates: Vec<f64> = entries.iter().map(|e| parse_rate(e.as_ref())).collect();
        Self::from_fractions(&rates).map_err(|_| short_schedule(entries.len()))
    }

    pub fn rate(&self, tier: CommissionTier) -> f64 {
        self.rates[tier.index()]
    }

    pub fn rates(&self) -> [f64; 3] {
        self.rates
    }
}

impl Default for CommissionSchedule {
    fn default() -> Self {
        Self::new([0.12, 0.14, 0.15])
    }
}

fn short_schedule(found: usize) -> PricingError {
    PricingError::invalid(format!("commission schedule needs three rates, got {}", found))
}
