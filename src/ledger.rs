//! Trade record and the append-only trade ledger.
//!
//! Trades are created only by the matching path, never mutated, and never
//! deleted for the life of the process. Queries read newest-first.

use crate::types::{Side, TradeId};
use rust_decimal::Decimal;

/// One executed trade.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Trade {
    pub id: TradeId,
    /// Execution price: always the resting order's price.
    pub price: Decimal,
    pub quantity: Decimal,
    /// Side of the incoming order that triggered the match.
    pub taker_side: Side,
    /// Execution time, Unix millis.
    pub timestamp: u64,
}

/// Trades returned by history queries when the caller gives no limit.
pub const DEFAULT_TRADE_LIMIT: usize = 100;

/// Append-only, time-ordered trade history.
#[derive(Debug, Default)]
pub struct TradeLedger {
    trades: Vec<Trade>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one trade. Only the matching path writes here.
    pub fn append(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    /// Most recent trades, newest first, at most `limit` entries.
    pub fn recent(&self, limit: usize) -> Vec<Trade> {
        self.trades.iter().rev().take(limit).cloned().collect()
    }

    /// Looks up a trade by id. Absence is a plain `None`, not a fault.
    pub fn by_id(&self, id: TradeId) -> Option<Trade> {
        self.trades.iter().find(|t| t.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}
