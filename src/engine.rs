//! Single-entry engine facade.
//!
//! Owns the order book, the trade ledger, and the trade-id counter so the
//! protocol layer never touches [`OrderBook`] or [`match_order`] directly.
//! Mutations (`submit_order`, `load_snapshot`) take `&mut self`: whoever wraps
//! the engine in a lock gets decide-match-mutate as one indivisible step,
//! while the read-only accessors take `&self` and can share a read guard.

use crate::book::{Depth, OrderBook};
use crate::ledger::{Trade, TradeLedger};
use crate::matching::match_order;
use crate::snapshot::Snapshot;
use crate::types::{Order, OrderId, TradeId};
use log::info;
use rust_decimal::Decimal;

/// Matching engine for one trading pair.
#[derive(Debug)]
pub struct Engine {
    book: OrderBook,
    ledger: TradeLedger,
    next_trade_id: u64,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            book: OrderBook::new(),
            ledger: TradeLedger::new(),
            next_trade_id: 1,
        }
    }

    /// Submits a validated limit order: runs matching, appends any trades to
    /// the ledger, rests the remainder. Returns the order's id whether it was
    /// fully filled, partially filled, or rested wholesale.
    pub fn submit_order(&mut self, order: Order) -> OrderId {
        info!(
            "order submitted id={} side={:?} price={} quantity={}",
            order.id, order.side, order.price, order.quantity
        );
        let trades = match_order(&mut self.book, &order, self.next_trade_id);
        self.next_trade_id += trades.len() as u64;
        for trade in trades {
            info!(
                "trade id={} price={} quantity={} taker_side={:?}",
                trade.id.0, trade.price, trade.quantity, trade.taker_side
            );
            self.ledger.append(trade);
        }
        order.id
    }

    /// Replaces all resting liquidity with the snapshot's. All-or-nothing: the
    /// payload is converted and validated in full before the book is cleared,
    /// so a malformed snapshot leaves the book exactly as it was. The trade
    /// ledger and the trade-id counter are untouched.
    pub fn load_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), String> {
        let (bids, asks) = snapshot.resting_orders()?;
        let (bid_count, ask_count) = (bids.len(), asks.len());
        self.book.clear();
        for order in bids {
            self.book.add_order(order);
        }
        for order in asks {
            self.book.add_order(order);
        }
        info!(
            "order book replaced from snapshot: {} bid orders, {} ask orders",
            bid_count, ask_count
        );
        Ok(())
    }

    /// Per-level aggregate view: bids descending, asks ascending.
    pub fn depth(&self) -> Depth {
        self.book.depth()
    }

    /// Most recent trades, newest first, at most `limit`.
    pub fn recent_trades(&self, limit: usize) -> Vec<Trade> {
        self.ledger.recent(limit)
    }

    /// Trade by id; `None` when no such trade exists.
    pub fn trade(&self, id: TradeId) -> Option<Trade> {
        self.ledger.by_id(id)
    }

    pub fn trade_count(&self) -> usize {
        self.ledger.len()
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.book.best_bid()
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.book.best_ask()
    }

    /// Remaining quantity of a resting order, if it is on the book.
    pub fn resting_quantity(&self, id: &OrderId) -> Option<Decimal> {
        self.book.resting_quantity(id)
    }
}
