//! Shipping channel table and the cheapest-channel resolver.

pub mod channel;
pub mod resolver;

pub use channel::{ChannelTable, ShippingChannel};
pub use resolver::{ShippingQuote, ShippingResolver};
