//! Core types for the order book: side, identifiers, and the order record.

use rust_decimal::Decimal;
use std::time::{SystemTime, UNIX_EPOCH};

/// Order side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

/// Unique order identifier. Opaque; a fresh UUID when the caller does not supply one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn fresh() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trade identifier. Strictly increasing for the life of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct TradeId(pub u64);

/// A limit order.
///
/// `quantity` is the remaining quantity: it is the only field that changes while
/// the order rests on the book, and it is always positive for a resting order.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
    /// Creation time, Unix millis.
    pub timestamp: u64,
}

impl Order {
    /// Builds an order with a fresh id stamped at the current time.
    pub fn new(side: Side, price: Decimal, quantity: Decimal) -> Self {
        Self {
            id: OrderId::fresh(),
            side,
            price,
            quantity,
            timestamp: now_millis(),
        }
    }
}

/// Current time as Unix millis. Clock errors collapse to 0 rather than panic.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
