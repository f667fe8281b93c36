//! Physical package facts: bounding box and weight.

pub mod dimensions;
pub mod weight;

pub use dimensions::{DimensionSet, LengthUnit};
pub use weight::{Weight, WeightUnit};
