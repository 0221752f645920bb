//! Single-pair order book: bids and asks with price-time priority.
//!
//! Each side is an ordered map from price to a FIFO queue of resting orders.
//! Best bid is the highest price, best ask the lowest. A price level is removed
//! the moment its last order is consumed; no level ever holds an empty queue.
//! The book is a pure ordered container: it takes liquidity when asked but
//! never decides whether to match (see [`crate::matching`]).

use crate::types::{Order, OrderId, Side};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// An order resting at a price level. The price is the level key.
#[derive(Clone, Debug)]
pub struct RestingOrder {
    pub id: OrderId,
    pub quantity: Decimal,
    pub timestamp: u64,
}

/// One liquidity take against a resting order.
#[derive(Clone, Debug)]
pub struct Fill {
    pub resting_order_id: OrderId,
    /// The resting order's price; trades always execute at it.
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Aggregate quantity at one price level.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DepthLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Both sides of the book aggregated per price level, in priority order.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Depth {
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
}

/// Order book for one trading pair.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: BTreeMap<Decimal, Vec<RestingOrder>>,
    asks: BTreeMap<Decimal, Vec<RestingOrder>>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rests an order at the tail of its price level (last in time priority).
    /// Does not run matching; callers go through [`crate::matching::match_order`].
    pub fn add_order(&mut self, order: Order) {
        let side = match order.side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        side.entry(order.price).or_default().push(RestingOrder {
            id: order.id,
            quantity: order.quantity,
            timestamp: order.timestamp,
        });
    }

    /// Takes liquidity from the ask side for an incoming buy willing to pay up
    /// to `price_limit`. Walks levels from the lowest price, FIFO within each
    /// level, stopping at the first level above the limit. Consumed orders and
    /// emptied levels are removed.
    pub fn take_from_asks(&mut self, price_limit: Decimal, mut quantity: Decimal) -> Vec<Fill> {
        let mut fills = Vec::new();
        let mut empty_prices = Vec::new();
        for (price, queue) in self.asks.iter_mut() {
            if *price > price_limit || quantity <= Decimal::ZERO {
                break;
            }
            Self::drain_level(*price, queue, &mut quantity, &mut fills);
            if queue.is_empty() {
                empty_prices.push(*price);
            }
        }
        for p in empty_prices {
            self.asks.remove(&p);
        }
        fills
    }

    /// Takes liquidity from the bid side for an incoming sell willing to accept
    /// down to `price_limit`. Walks levels from the highest price.
    pub fn take_from_bids(&mut self, price_limit: Decimal, mut quantity: Decimal) -> Vec<Fill> {
        let mut fills = Vec::new();
        let mut empty_prices = Vec::new();
        // BTreeMap iterates ascending; bids are consumed best (highest) first.
        let bid_prices: Vec<Decimal> = self.bids.keys().copied().rev().collect();
        for price in bid_prices {
            if price < price_limit || quantity <= Decimal::ZERO {
                break;
            }
            let queue = match self.bids.get_mut(&price) {
                Some(q) => q,
                None => continue,
            };
            Self::drain_level(price, queue, &mut quantity, &mut fills);
            if queue.is_empty() {
                empty_prices.push(price);
            }
        }
        for p in empty_prices {
            self.bids.remove(&p);
        }
        fills
    }

    /// Consumes one level front-to-back. A partial take decrements the front
    /// order in place; a full take removes it, keeping the rest of the queue in
    /// arrival order.
    fn drain_level(
        price: Decimal,
        queue: &mut Vec<RestingOrder>,
        quantity: &mut Decimal,
        fills: &mut Vec<Fill>,
    ) {
        while !queue.is_empty() && *quantity > Decimal::ZERO {
            let resting = &mut queue[0];
            let fill_qty = (*quantity).min(resting.quantity);
            *quantity -= fill_qty;
            fills.push(Fill {
                resting_order_id: resting.id.clone(),
                price,
                quantity: fill_qty,
            });
            if fill_qty >= resting.quantity {
                queue.remove(0);
            } else {
                resting.quantity -= fill_qty;
            }
        }
    }

    /// Removes every resting order from both sides.
    pub fn clear(&mut self) {
        self.bids.clear();
        self.asks.clear();
    }

    /// Best bid price (None if empty).
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.keys().next_back().copied()
    }

    /// Best ask price (None if empty).
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.keys().next().copied()
    }

    /// Remaining quantity of a resting order, searching both sides.
    pub fn resting_quantity(&self, id: &OrderId) -> Option<Decimal> {
        self.bids
            .values()
            .chain(self.asks.values())
            .flatten()
            .find(|r| &r.id == id)
            .map(|r| r.quantity)
    }

    /// Per-level aggregates: bids descending by price, asks ascending.
    pub fn depth(&self) -> Depth {
        let aggregate = |queue: &Vec<RestingOrder>| queue.iter().map(|r| r.quantity).sum();
        Depth {
            bids: self
                .bids
                .iter()
                .rev()
                .map(|(price, queue)| DepthLevel {
                    price: *price,
                    quantity: aggregate(queue),
                })
                .collect(),
            asks: self
                .asks
                .iter()
                .map(|(price, queue)| DepthLevel {
                    price: *price,
                    quantity: aggregate(queue),
                })
                .collect(),
        }
    }

    /// Number of price levels on each side as (bids, asks).
    pub fn level_counts(&self) -> (usize, usize) {
        (self.bids.len(), self.asks.len())
    }
}
