//! Externally supplied order book snapshots.
//!
//! A snapshot is a point-in-time dump of all resting liquidity, used to
//! (re)initialize the book. Prices and quantities arrive as decimal strings,
//! the upstream feed's convention. Conversion validates the whole payload
//! before any book mutation so a malformed snapshot never half-applies.

use crate::types::{now_millis, Order, OrderId, Side};
use rust_decimal::Decimal;

/// Snapshot payload: all resting liquidity per side, best price first.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    pub bids: Vec<SnapshotLevel>,
    pub asks: Vec<SnapshotLevel>,
}

/// One price level: the orders resting at `price`, in time priority.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SnapshotLevel {
    pub price: String,
    pub orders: Vec<SnapshotOrder>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SnapshotOrder {
    pub order_id: String,
    pub quantity: String,
}

impl Snapshot {
    /// Converts the payload into resting (bid, ask) orders, preserving the
    /// per-level sequencing as initial time priority. Fails on the first
    /// unparsable or non-positive price/quantity without partial output.
    pub fn resting_orders(&self) -> Result<(Vec<Order>, Vec<Order>), String> {
        let loaded_at = now_millis();
        let bids = side_orders(&self.bids, Side::Buy, loaded_at)?;
        let asks = side_orders(&self.asks, Side::Sell, loaded_at)?;
        Ok((bids, asks))
    }
}

fn side_orders(levels: &[SnapshotLevel], side: Side, loaded_at: u64) -> Result<Vec<Order>, String> {
    let mut out = Vec::new();
    for level in levels {
        let price = parse_positive(&level.price, "price")?;
        for entry in &level.orders {
            let quantity = parse_positive(&entry.quantity, "quantity")?;
            out.push(Order {
                id: OrderId(entry.order_id.clone()),
                side,
                price,
                quantity,
                timestamp: loaded_at,
            });
        }
    }
    Ok(out)
}

fn parse_positive(raw: &str, field: &str) -> Result<Decimal, String> {
    let value: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| format!("snapshot {} '{}' is not a decimal", field, raw))?;
    if value <= Decimal::ZERO {
        return Err(format!("snapshot {} '{}' must be positive", field, raw));
    }
    Ok(value)
}
