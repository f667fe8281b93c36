//! Package weight parsing, normalized to grams.

use crate::error::{PricingError, Result};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// A number followed by the whole word after it; the word decides whether it is a weight.
static WEIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)\s*([a-zа-яё千克公斤]+)").unwrap()
});

static BARE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:[.,]\d+)?)\s*$").unwrap());

/// Weight unit as it appears in extracted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    G,
    Kg,
    Lb,
    Oz,
}

impl WeightUnit {
    /// Grams per one unit.
    pub fn gram_factor(&self) -> f64 {
        match self {
            WeightUnit::G => 1.0,
            WeightUnit::Kg => 1000.0,
            WeightUnit::Lb => 453.592_37,
            WeightUnit::Oz => 28.349_523_125,
        }
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" | "г" | "гр" | "грамм"
            | "грамма" | "граммов" | "克" => Ok(WeightUnit::G),
            "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" | "kilogramme"
            | "kilogrammes" | "кг" | "килограмм" | "килограмма" | "килограммов" | "千克"
            | "公斤" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lb),
            "oz" | "ounce" | "ounces" => Ok(WeightUnit::Oz),
            _ => Err(format!("Unknown weight unit: {}. Use: g, kg, lb, oz", s)),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightUnit::G => write!(f, "g"),
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::Lb => write!(f, "lb"),
            WeightUnit::Oz => write!(f, "oz"),
        }
    }
}

/// A weight reading with its original unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weight {
    pub value: f64,
    #[serde(default)]
    pub unit: WeightUnit,
}

impl Weight {
    pub fn new(value: f64, unit: WeightUnit) -> Self {
        Self { value, unit }
    }

    /// Parses the first number carrying a weight unit, skipping counts like "2 pcs".
    /// Text that is only a number is read as grams.
    pub fn parse(text: &str) -> Result<Self> {
        let lowered = text.to_lowercase();

        let with_unit = WEIGHT.captures_iter(&lowered).find_map(|caps| {
            let unit = caps[2].parse::<WeightUnit>().ok()?;
            Some((caps.get(1)?.as_str(), unit))
        });

        let (number, unit) = match with_unit {
            Some(found) => found,
            None => {
                let caps = BARE_NUMBER
                    .captures(&lowered)
                    .ok_or_else(|| PricingError::invalid(format!("no weight found in '{}'", text)))?;
                (caps.get(1).map_or("", |m| m.as_str()), WeightUnit::G)
            }
        };

        let value = number
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| PricingError::invalid(format!("bad weight '{}'", number)))?;

        Ok(Self::new(value, unit))
    }

    pub fn to_grams(&self) -> f64 {
        self.value * self.unit.gram_factor()
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

impl FromStr for Weight {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
