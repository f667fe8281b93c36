//! CLI command implementations.

pub mod quote;
pub mod shipping;

pub use quote::{QuoteCommand, QuoteRequest};
pub use shipping::ShippingCommand;
