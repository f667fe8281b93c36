//! Shipping channel records and the channel table.

use serde::{Deserialize, Serialize};

/// A shipping service option with eligibility bands and a linear fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingChannel {
    /// Channel code used by the carrier (not unique across the table)
    pub code: String,
    /// Service name
    pub channel_name: String,
    /// Package class this channel is meant for
    #[serde(default)]
    pub channel_type: String,
    /// Minimum declared value, destination currency (inclusive)
    #[serde(alias = "min_value_rub")]
    pub min_value: f64,
    /// Maximum declared value, destination currency (inclusive)
    #[serde(alias = "max_value_rub")]
    pub max_value: f64,
    /// Minimum weight in grams (inclusive)
    pub min_weight_g: f64,
    /// Maximum weight in grams (inclusive)
    pub max_weight_g: f64,
    /// Longest single edge allowed, cm
    pub max_dimension_cm: f64,
    /// Maximum length + width + height, cm
    pub max_girth_cm: f64,
    /// Fixed part of the fee, origin currency
    #[serde(alias = "pickup_base")]
    pub base_fee: f64,
    /// Fee per gram, origin currency
    #[serde(alias = "pickup_per_g")]
    pub per_gram_rate: f64,
    /// Advertised delivery window
    #[serde(default)]
    pub delivery_days: String,
    /// Recently observed delivery time
    #[serde(default)]
    pub recent_delivery: Option<String>,
    #[serde(default)]
    pub notes: String,
}

impl ShippingChannel {
    /// Fee for a parcel of the given weight.
    pub fn fee(&self, weight_g: f64) -> f64 {
        self.base_fee + self.per_gram_rate * weight_g
    }

    /// Human-readable fee formula for the given weight.
    pub fn formula(&self, weight_g: f64) -> String {
        format!("{} + {} × {}", self.base_fee, self.per_gram_rate, weight_g)
    }
}

/// Immutable, ordered set of channels. Order breaks fee ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelTable {
    channels: Vec<ShippingChannel>,
}

impl ChannelTable {
    pub fn new(channels: Vec<ShippingChannel>) -> Self {
        Self { channels }
    }

    /// The UNI Economy channel table.
    pub fn builtin() -> Self {
        Self::new(vec![
            uni(
                "UNW",
                "UNI Economy Extra Small",
                "UNI Extra Small: 1g-500g",
                (0.0, 1500.0),
                (1.0, 500.0),
                (60.0, 90.0),
                (3.0, 0.025),
                "20-25 days",
                Some("20 days"),
            ),
            uni(
                "UNZ",
                "UNI Economy Budget",
                "UNI Budget: 501g-25kg",
                (0.0, 1500.0),
                (501.0, 25000.0),
                (60.0, 150.0),
                (23.0, 0.017),
                "20-25 days",
                Some("20 days"),
            ),
            uni(
                "UNV",
                "UNI Economy Small",
                "UNI Small: 1g-2kg",
                (1501.0, 7000.0),
                (1.0, 2000.0),
                (60.0, 150.0),
                (16.0, 0.025),
                "12-17 days",
                None,
            ),
            uni(
                "UNZ",
                "UNI Economy Big",
                "UNI Big: 2.001kg-25kg",
                (1501.0, 7000.0),
                (2001.0, 25000.0),
                (150.0, 250.0),
                (36.0, 0.017),
                "20-25 days",
                Some("20 days"),
            ),
            uni(
                "UNM",
                "UNI Economy Premium Small",
                "UNI Premium Small: 1g-5kg",
                (7001.0, 250000.0),
                (1.0, 5000.0),
                (150.0, 250.0),
                (22.0, 0.025),
                "13-18 days",
                None,
            ),
            uni(
                "UNZ",
                "UNI Economy Premium Big",
                "UNI Premium Big: 5.001kg-25kg",
                (7001.0, 250000.0),
                (5001.0, 25000.0),
                (150.0, 310.0),
                (62.0, 0.023),
                "20-25 days",
                None,
            ),
        ])
    }

    pub fn channels(&self) -> &[ShippingChannel] {
        &self.channels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShippingChannel> {
        self.channels.iter()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl Default for ChannelTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn uni(
    code: &str,
    channel_name: &str,
    channel_type: &str,
    (min_value, max_value): (f64, f64),
    (min_weight_g, max_weight_g): (f64, f64),
    (max_dimension_cm, max_girth_cm): (f64, f64),
    (base_fee, per_gram_rate): (f64, f64),
    delivery_days: &str,
    recent_delivery: Option<&str>,
) -> ShippingChannel {
    ShippingChannel {
        code: code.to_string(),
        channel_name: channel_name.to_string(),
        channel_type: channel_type.to_string(),
        min_value,
        max_value,
        min_weight_g,
        max_weight_g,
        max_dimension_cm,
        max_girth_cm,
        base_fee,
        per_gram_rate,
        delivery_days: delivery_days.to_string(),
        recent_delivery: recent_delivery.map(String::from),
        notes: String::new(),
    }
}
