//! Package bounding box with unit normalization.

use crate::error::{PricingError, Result};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// "100 x 50 x 30 mm", "10×10×10см", "4X3X2 in". The whole word after the triple is the unit.
static DIMENSIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)\s*[x×]\s*(\d+(?:[.,]\d+)?)\s*[x×]\s*(\d+(?:[.,]\d+)?)\s*([a-zа-яё毫厘米]+)?")
        .unwrap()
});

/// Length unit of an extracted dimension triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Mm,
    Cm,
    M,
    Inch,
}

impl LengthUnit {
    /// Centimeters per one unit.
    pub fn cm_factor(&self) -> f64 {
        match self {
            LengthUnit::Mm => 0.1,
            LengthUnit::Cm => 1.0,
            LengthUnit::M => 100.0,
            LengthUnit::Inch => 2.54,
        }
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" | "мм"
            | "миллиметр" | "миллиметра" | "миллиметров" | "毫米" => Ok(LengthUnit::Mm),
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" | "см"
            | "сантиметр" | "сантиметра" | "сантиметров" | "厘米" => Ok(LengthUnit::Cm),
            "m" | "meter" | "meters" | "metre" | "metres" | "м" | "метр" | "метра" | "метров"
            | "米" => Ok(LengthUnit::M),
            "in" | "inch" | "inches" => Ok(LengthUnit::Inch),
            _ => Err(format!("Unknown length unit: {}. Use: mm, cm, m, in", s)),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LengthUnit::Mm => write!(f, "mm"),
            LengthUnit::Cm => write!(f, "cm"),
            LengthUnit::M => write!(f, "m"),
            LengthUnit::Inch => write!(f, "in"),
        }
    }
}

/// Length, width and height of a package in a given unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionSet {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub unit: LengthUnit,
}

impl DimensionSet {
    /// Creates a dimension triple in the given unit.
    pub fn new(length: f64, width: f64, height: f64, unit: LengthUnit) -> Self {
        Self { length, width, height, unit }
    }

    /// Creates a dimension triple already in centimeters.
    pub fn cm(length: f64, width: f64, height: f64) -> Self {
        Self::new(length, width, height, LengthUnit::Cm)
    }

    /// Parses an extracted "L x W x H unit" fragment; the unit defaults to millimeters.
    pub fn parse(text: &str) -> Result<Self> {
        let lowered = text.to_lowercase();
        let caps = DIMENSIONS
            .captures(&lowered)
            .ok_or_else(|| PricingError::invalid(format!("no dimensions found in '{}'", text)))?;

        let edge = |i: usize| -> Result<f64> {
            caps[i]
                .replace(',', ".")
                .parse::<f64>()
                .map_err(|_| PricingError::invalid(format!("bad dimension '{}'", &caps[i])))
        };

        let unit = match caps.get(4) {
            Some(m) => m.as_str().parse().map_err(PricingError::InvalidInput)?,
            None => LengthUnit::Mm,
        };

        Ok(Self::new(edge(1)?, edge(2)?, edge(3)?, unit))
    }

    /// Returns the three edges converted to centimeters.
    pub fn to_cm(&self) -> [f64; 3] {
        let k = self.unit.cm_factor();
        [self.length * k, self.width * k, self.height * k]
    }

    /// Longest single edge in centimeters.
    pub fn max_dimension_cm(&self) -> f64 {
        self.to_cm().into_iter().fold(f64::MIN, f64::max)
    }

    /// Sum of the three edges in centimeters.
    pub fn girth_cm(&self) -> f64 {
        self.to_cm().iter().sum()
    }

    pub fn validate(&self) -> Result<()> {
        let edges = [self.length, self.width, self.height];
        if edges.iter().all(|e| e.is_finite() && *e > 0.0) {
            Ok(())
        } else {
            Err(PricingError::invalid(format!("dimensions must be positive, got {}", self)))
        }
    }
}

impl fmt::Display for DimensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} x {} {}", self.length, self.width, self.height, self.unit)
    }
}

impl FromStr for DimensionSet {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
